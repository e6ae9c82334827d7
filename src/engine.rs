//! Fusion engine: ingestion, pressure gating, effect accumulation, and
//! normalization.
//!
//! The engine itself is stateless apart from its [`FusionConfig`]; all
//! session state lives in a caller-owned [`FusionState`]. One update cycle
//! looks like:
//!
//! 1. The transport collaborator delivers two eight-value frames and the
//!    caller passes them to [`FusionEngine::ingest`].
//! 2. The caller applies whichever [`Effect`] is currently selected.
//! 3. The apply call gates on total pressure, folds the signed zone sums
//!    into that effect's accumulator, re-normalizes, and returns the bounded
//!    signal for the presentation layer.
//!
//! # Accumulation model
//!
//! Diagonal pressure pairs drive rotation: lower-right and upper-left
//! pressure rotate clockwise, upper-right and lower-left counter-clockwise,
//! modeling a foot-twist gesture. Scroll and slide both use the whole-foot
//! pressure difference between feet, with opposite sign conventions, on
//! separate accumulators so the three effects never interfere.
//!
//! # Example
//!
//! ```
//! use insole_fusion::{Effect, FusionConfig, FusionEngine, FusionState};
//!
//! let engine = FusionEngine::new(FusionConfig::default());
//! let mut state = FusionState::new(&[0; 8], &[0; 8])?;
//!
//! // One hardware update: firm left toe pressure, right foot idle.
//! engine.ingest(&mut state, &[0, 0, 0, 0, 10, 10, 10, 10], &[0; 8])?;
//!
//! let outcome = engine.apply(&mut state, Effect::Rotate);
//! assert!(outcome.value().is_some());
//! # Ok::<(), insole_fusion::FusionError>(())
//! ```

use log::debug;

use crate::config::{FusionConfig, IngestMode};
use crate::error::{FusionError, Result};
use crate::sensor::SensorZone;
use crate::state::FusionState;
use crate::{FULL_SCALE_PRESSURE, LABEL_COUNT, SENSOR_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UI effect driven by the fused pressure signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Effect {
    /// Image rotation (radians).
    Rotate,
    /// Content scrolling (offset).
    Scroll,
    /// Slider positioning.
    Slide,
}

/// Result of applying an effect update.
///
/// Below-threshold is a normal skip, not an error: it means "no gesture",
/// while an [`Applied`](Self::Applied) value means the accumulator moved.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EffectOutcome {
    /// The accumulator was updated; carries the normalized signal.
    Applied(f64),
    /// Neither foot's total pressure exceeded the sensitivity threshold;
    /// the accumulator is unchanged.
    BelowThreshold,
}

impl EffectOutcome {
    /// The normalized signal, if the update was applied.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Applied(v) => Some(*v),
            Self::BelowThreshold => None,
        }
    }

    /// Whether the accumulator was updated.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Unweighted per-zone pressure averages for display.
///
/// Each field is `sum(foot, zone) / (SENSOR_COUNT / LABEL_COUNT)`. Purely a
/// debug/label readout; never fed back into any accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneAverages {
    pub lower_right: u64,
    pub upper_right: u64,
    pub lower_left: u64,
    pub upper_left: u64,
}

/// Map a raw accumulated pressure difference onto a signed angle in radians.
///
/// The working range of ±`FULL_SCALE_PRESSURE` raw units (eight sensors at
/// magnitude 100) maps to ±2π: one full turn at maximum sustained pressure
/// imbalance.
#[must_use]
pub fn normalize_rotation(raw: f64) -> f64 {
    raw / f64::from(FULL_SCALE_PRESSURE) * std::f64::consts::TAU
}

/// Map a raw accumulated pressure difference onto a scroll offset.
#[must_use]
pub fn normalize_scroll(raw: f64) -> f64 {
    raw / f64::from(FULL_SCALE_PRESSURE)
}

/// Map a raw accumulated pressure difference onto a slide position.
///
/// Same formula family as [`normalize_scroll`]; kept separate because the
/// two signals feed independent output channels.
#[must_use]
pub fn normalize_slide(raw: f64) -> f64 {
    raw / f64::from(FULL_SCALE_PRESSURE)
}

/// Stateless fusion algorithms parameterized by a [`FusionConfig`].
///
/// # Example
///
/// ```
/// use insole_fusion::{FusionConfig, FusionEngine, FusionState};
///
/// let engine = FusionEngine::new(FusionConfig::snapshot());
/// let mut state = FusionState::new(&[0; 8], &[0; 8])?;
/// engine.ingest(&mut state, &[5; 8], &[3; 8])?;
/// # Ok::<(), insole_fusion::FusionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    config: FusionConfig,
}

impl FusionEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Fold one hardware update (one frame per foot) into the state.
    ///
    /// Both frames are validated before either foot is touched, so a bad
    /// frame leaves the state fully unchanged. No gating happens here —
    /// gating is per effect, at apply time.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::SensorCountMismatch`] if either frame does not
    /// contain exactly [`SENSOR_COUNT`] values.
    pub fn ingest(
        &self,
        state: &mut FusionState,
        left_values: &[u32],
        right_values: &[u32],
    ) -> Result<()> {
        if left_values.len() != SENSOR_COUNT {
            return Err(FusionError::sensor_count_mismatch(left_values.len()));
        }
        if right_values.len() != SENSOR_COUNT {
            return Err(FusionError::sensor_count_mismatch(right_values.len()));
        }

        match self.config.ingest_mode {
            IngestMode::Append => {
                state.left.append(left_values)?;
                state.right.append(right_values)?;
            }
            IngestMode::Replace => {
                state.left.replace(left_values)?;
                state.right.replace(right_values)?;
            }
        }
        Ok(())
    }

    /// Apply the currently selected effect.
    pub fn apply(&self, state: &mut FusionState, effect: Effect) -> EffectOutcome {
        match effect {
            Effect::Rotate => self.apply_rotation(state),
            Effect::Scroll => self.apply_scroll(state),
            Effect::Slide => self.apply_slide(state),
        }
    }

    /// Update the rotation accumulator and return the normalized angle.
    ///
    /// Lower-right and upper-left pressure drive clockwise rotation;
    /// upper-right and lower-left drive counter-clockwise.
    pub fn apply_rotation(&self, state: &mut FusionState) -> EffectOutcome {
        if !self.gate_passes(state) {
            debug!("pressure below sensitivity threshold, skipping rotation update");
            return EffectOutcome::BelowThreshold;
        }

        state.rotation -= state.right.sum(SensorZone::Upper) as f64;
        state.rotation -= state.left.sum(SensorZone::Lower) as f64;
        state.rotation += state.right.sum(SensorZone::Lower) as f64;
        state.rotation += state.left.sum(SensorZone::Upper) as f64;

        state.rotation = normalize_rotation(state.rotation);
        EffectOutcome::Applied(state.rotation)
    }

    /// Update the scroll accumulator and return the normalized offset.
    ///
    /// Right-foot pressure scrolls one direction, left-foot the other; the
    /// net whole-foot difference is the control signal.
    pub fn apply_scroll(&self, state: &mut FusionState) -> EffectOutcome {
        if !self.gate_passes(state) {
            debug!("pressure below sensitivity threshold, skipping scroll update");
            return EffectOutcome::BelowThreshold;
        }

        state.scroll -= state.right.sum(SensorZone::Whole) as f64;
        state.scroll += state.left.sum(SensorZone::Whole) as f64;

        state.scroll = normalize_scroll(state.scroll);
        EffectOutcome::Applied(state.scroll)
    }

    /// Update the slide accumulator and return the normalized position.
    ///
    /// Right-foot pressure moves the slider right, left-foot left.
    pub fn apply_slide(&self, state: &mut FusionState) -> EffectOutcome {
        if !self.gate_passes(state) {
            debug!("pressure below sensitivity threshold, skipping slide update");
            return EffectOutcome::BelowThreshold;
        }

        state.slide += state.right.sum(SensorZone::Whole) as f64;
        state.slide -= state.left.sum(SensorZone::Whole) as f64;

        state.slide = normalize_slide(state.slide);
        EffectOutcome::Applied(state.slide)
    }

    /// Per-zone average pressure contributions for display labels.
    ///
    /// The four outputs are independent: each zone reads its own foot's sum.
    #[must_use]
    pub fn zone_averages(&self, state: &FusionState) -> ZoneAverages {
        let per_zone = (SENSOR_COUNT / LABEL_COUNT) as u64;
        ZoneAverages {
            lower_right: state.right.sum(SensorZone::Lower) / per_zone,
            upper_right: state.right.sum(SensorZone::Upper) / per_zone,
            lower_left: state.left.sum(SensorZone::Lower) / per_zone,
            upper_left: state.left.sum(SensorZone::Upper) / per_zone,
        }
    }

    /// Whether either foot's total pressure exceeds the noise floor.
    fn gate_passes(&self, state: &FusionState) -> bool {
        state.left.sum(SensorZone::Whole) > self.config.sensitivity_threshold
            || state.right.sum(SensorZone::Whole) > self.config.sensitivity_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const ZEROS: [u32; 8] = [0; 8];
    /// Whole-foot sum 40: lower half idle, upper half at 10 each.
    const UPPER_ONLY: [u32; 8] = [0, 0, 0, 0, 10, 10, 10, 10];

    fn engine() -> FusionEngine {
        FusionEngine::new(FusionConfig::default())
    }

    fn fresh_state() -> FusionState {
        FusionState::new(&ZEROS, &ZEROS).unwrap()
    }

    #[test]
    fn test_gate_skips_on_silence() {
        let engine = engine();
        let mut state = fresh_state();

        for effect in [Effect::Rotate, Effect::Scroll, Effect::Slide] {
            assert_eq!(engine.apply(&mut state, effect), EffectOutcome::BelowThreshold);
        }
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.scroll, 0.0);
        assert_eq!(state.slide, 0.0);
    }

    #[test]
    fn test_gate_boundary_is_exclusive() {
        let engine = engine();
        // Both feet sum to exactly 25: still below threshold.
        let mut state = fresh_state();
        engine
            .ingest(&mut state, &[25, 0, 0, 0, 0, 0, 0, 0], &[25, 0, 0, 0, 0, 0, 0, 0])
            .unwrap();
        assert!(!engine.apply_rotation(&mut state).is_applied());

        // One more unit on one foot opens the gate.
        engine.ingest(&mut state, &[1, 0, 0, 0, 0, 0, 0, 0], &ZEROS).unwrap();
        assert!(engine.apply_rotation(&mut state).is_applied());
    }

    #[test]
    fn test_rotation_upper_left_pressure() {
        let engine = engine();
        let mut state = fresh_state();
        engine.ingest(&mut state, &UPPER_ONLY, &ZEROS).unwrap();

        let outcome = engine.apply_rotation(&mut state);
        // Delta is +sum(left, Upper) = 40; normalized to 40/800 * 2π.
        let expected = 40.0 / 800.0 * TAU;
        assert_eq!(outcome.value(), Some(state.rotation));
        assert!((state.rotation - expected).abs() < 1e-12);
        assert!((state.rotation - 0.3141).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_diagonals_cancel() {
        let engine = engine();
        let mut state = fresh_state();
        // All four zone sums equal (20 each): contributions cancel exactly.
        engine.ingest(&mut state, &[5; 8], &[5; 8]).unwrap();

        let outcome = engine.apply_rotation(&mut state);
        assert_eq!(outcome, EffectOutcome::Applied(0.0));
        assert_eq!(state.rotation, 0.0);
    }

    #[test]
    fn test_rotation_sign_convention() {
        let engine = engine();
        // Upper-right pressure alone rotates counter-clockwise (negative).
        let mut state = fresh_state();
        engine.ingest(&mut state, &ZEROS, &UPPER_ONLY).unwrap();
        engine.apply_rotation(&mut state);
        assert!(state.rotation < 0.0);

        // Lower-right pressure alone rotates clockwise (positive).
        let mut state = fresh_state();
        engine
            .ingest(&mut state, &ZEROS, &[10, 10, 10, 10, 0, 0, 0, 0])
            .unwrap();
        engine.apply_rotation(&mut state);
        assert!(state.rotation > 0.0);
    }

    #[test]
    fn test_scroll_direction() {
        let engine = engine();
        let mut state = fresh_state();
        engine.ingest(&mut state, &[10; 8], &ZEROS).unwrap();

        let outcome = engine.apply_scroll(&mut state);
        // Left-foot sum 80 scrolls positive: 80/800 = 0.1.
        assert_eq!(outcome, EffectOutcome::Applied(0.1));

        let mut state = fresh_state();
        engine.ingest(&mut state, &ZEROS, &[10; 8]).unwrap();
        engine.apply_scroll(&mut state);
        assert!((state.scroll + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_slide_direction_opposes_scroll() {
        let engine = engine();
        let mut state = fresh_state();
        engine.ingest(&mut state, &[10; 8], &ZEROS).unwrap();

        engine.apply_scroll(&mut state);
        engine.apply_slide(&mut state);
        assert!(state.scroll > 0.0);
        assert!(state.slide < 0.0);
        assert!((state.scroll + state.slide).abs() < 1e-12);
    }

    #[test]
    fn test_accumulators_are_independent() {
        let engine = engine();
        let mut state = fresh_state();
        engine.ingest(&mut state, &[10; 8], &ZEROS).unwrap();

        engine.apply_scroll(&mut state);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.slide, 0.0);
    }

    #[test]
    fn test_normalization_feeds_back_into_accumulator() {
        let engine = engine();
        let mut state = fresh_state();
        engine.ingest(&mut state, &UPPER_ONLY, &ZEROS).unwrap();

        engine.apply_rotation(&mut state);
        let first = state.rotation;

        // Same readings applied again: new value is (prior + 40) renormalized,
        // not simply doubled.
        engine.apply_rotation(&mut state);
        let expected = (first + 40.0) / 800.0 * TAU;
        assert!((state.rotation - expected).abs() < 1e-12);
    }

    #[test]
    fn test_apply_dispatch() {
        let engine = engine();
        let mut state = fresh_state();
        engine.ingest(&mut state, &[10; 8], &ZEROS).unwrap();

        assert!(engine.apply(&mut state, Effect::Rotate).is_applied());
        assert!(engine.apply(&mut state, Effect::Scroll).is_applied());
        assert!(engine.apply(&mut state, Effect::Slide).is_applied());
    }

    #[test]
    fn test_ingest_is_all_or_nothing() {
        let engine = engine();
        let mut state = fresh_state();

        let err = engine.ingest(&mut state, &[10; 8], &[1, 2, 3]);
        assert!(matches!(
            err,
            Err(FusionError::SensorCountMismatch {
                expected: 8,
                actual: 3
            })
        ));
        // The valid left frame must not have been applied.
        assert_eq!(state.left.sum(SensorZone::Whole), 0);
        assert_eq!(state.left.len(), 8);
    }

    #[test]
    fn test_append_mode_accumulates_history() {
        let engine = engine();
        let mut state = fresh_state();
        engine.ingest(&mut state, &[10; 8], &[5; 8]).unwrap();
        engine.ingest(&mut state, &[1; 8], &[2; 8]).unwrap();

        // Initial zero frame + two updates = three blocks per foot.
        assert_eq!(state.left.len(), 24);
        assert_eq!(state.left.sum(SensorZone::Whole), 88);
        assert_eq!(state.right.sum(SensorZone::Whole), 56);
    }

    #[test]
    fn test_replace_mode_tracks_current_frame() {
        let engine = FusionEngine::new(FusionConfig::snapshot());
        let mut state = fresh_state();
        engine.ingest(&mut state, &[10; 8], &[5; 8]).unwrap();
        engine.ingest(&mut state, &[1; 8], &[2; 8]).unwrap();

        assert_eq!(state.left.len(), 8);
        assert_eq!(state.left.sum(SensorZone::Whole), 8);
        assert_eq!(state.right.sum(SensorZone::Whole), 16);

        // A quiet snapshot closes the gate again, unlike append mode.
        engine.ingest(&mut state, &ZEROS, &ZEROS).unwrap();
        assert_eq!(engine.apply_rotation(&mut state), EffectOutcome::BelowThreshold);
    }

    #[test]
    fn test_zone_averages_independent() {
        let engine = engine();
        let mut state = fresh_state();
        engine
            .ingest(
                &mut state,
                &[2, 2, 2, 2, 8, 8, 8, 8],
                &[4, 4, 4, 4, 6, 6, 6, 6],
            )
            .unwrap();

        let averages = engine.zone_averages(&state);
        assert_eq!(averages.lower_left, 4);
        assert_eq!(averages.upper_left, 16);
        assert_eq!(averages.lower_right, 8);
        assert_eq!(averages.upper_right, 12);
    }

    #[test]
    fn test_normalization_linearity() {
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert!((normalize_rotation(800.0) - TAU).abs() < 1e-12);
        assert!((normalize_rotation(-800.0) + TAU).abs() < 1e-12);
        assert_eq!(normalize_scroll(400.0), 0.5);
        assert_eq!(normalize_slide(-400.0), -0.5);
        assert_eq!(normalize_scroll(80.0), normalize_slide(80.0));
    }
}
