//! Session state for the fusion engine.
//!
//! A [`FusionState`] is created once per session, owned by the caller, and
//! passed by exclusive reference into every engine call. There is no hidden
//! global; two concurrent callers must serialize access externally.

use crate::error::Result;
use crate::sensor::FootSensorSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reading sets for both feet plus the three effect accumulators.
///
/// The accumulators are independent running signals; applying one effect
/// never touches the other two, even though all three derive from the same
/// underlying readings. They hold already-normalized values between calls
/// (each apply re-normalizes the accumulator after folding in new sums).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusionState {
    /// Left foot readings.
    pub left: FootSensorSet,
    /// Right foot readings.
    pub right: FootSensorSet,

    /// Rotation accumulator, radians after normalization.
    pub rotation: f64,
    /// Scroll accumulator, unitless offset after normalization.
    pub scroll: f64,
    /// Slide accumulator, unitless position after normalization.
    pub slide: f64,
}

impl FusionState {
    /// Create a session state from the initial pair of sensor frames.
    ///
    /// Before the first hardware read these are commonly all zeros.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FusionError::SensorCountMismatch`] if either frame
    /// does not contain exactly [`crate::SENSOR_COUNT`] values.
    pub fn new(left_values: &[u32], right_values: &[u32]) -> Result<Self> {
        Ok(Self {
            left: FootSensorSet::new(left_values)?,
            right: FootSensorSet::new(right_values)?,
            rotation: 0.0,
            scroll: 0.0,
            slide: 0.0,
        })
    }

    /// Zero the rotation accumulator.
    ///
    /// Caller-driven: the UI resets an accumulator when its effect becomes
    /// inactive. The engine never resets anything on its own.
    pub fn reset_rotation(&mut self) {
        self.rotation = 0.0;
    }

    /// Zero the scroll accumulator.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0.0;
    }

    /// Zero the slide accumulator.
    pub fn reset_slide(&mut self) {
        self.slide = 0.0;
    }
}
