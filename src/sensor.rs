//! Sensor readings and per-foot reading sets.
//!
//! An insole reports one frame of [`crate::SENSOR_COUNT`] pressure values per
//! update. Within a frame the first half of the values comes from the lower
//! (heel) half of the sole and the second half from the upper (toe) half;
//! [`FootSensorSet`] preserves that partition so the engine can query
//! zone-level pressure sums.

use crate::error::{FusionError, Result};
use crate::SENSOR_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zone selector for pressure queries.
///
/// `Upper` and `Lower` are storage zones assigned to readings at creation.
/// `Whole` exists only as a query-time aggregate: no reading ever carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorZone {
    /// Toe half of the sole.
    Upper,
    /// Heel half of the sole.
    Lower,
    /// Both halves combined. Query selector only.
    Whole,
}

/// A single pressure cell reading: which half of the sole it came from and
/// its magnitude in raw hardware units (typically 0–100).
///
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorReading {
    zone: SensorZone,
    magnitude: u32,
}

impl SensorReading {
    /// Create a reading. The zone must be a storage zone (`Upper` or `Lower`).
    ///
    /// # Errors
    ///
    /// Returns an error if `zone` is [`SensorZone::Whole`].
    pub fn new(zone: SensorZone, magnitude: u32) -> Result<Self> {
        if zone == SensorZone::Whole {
            return Err(FusionError::invalid_input(
                "readings carry a storage zone, not the Whole aggregate",
            ));
        }
        Ok(Self { zone, magnitude })
    }

    /// The half of the sole this reading came from.
    #[must_use]
    pub const fn zone(&self) -> SensorZone {
        self.zone
    }

    /// Raw pressure magnitude.
    #[must_use]
    pub const fn magnitude(&self) -> u32 {
        self.magnitude
    }

    /// Whether this reading matches a query zone.
    #[must_use]
    pub fn matches(&self, query: SensorZone) -> bool {
        query == SensorZone::Whole || self.zone == query
    }
}

/// Zone for a value's position within an eight-element frame. Indices
/// `[0, 4)` are lower, `[4, 8)` upper.
const fn zone_for_index(index: usize) -> SensorZone {
    if index % SENSOR_COUNT < SENSOR_COUNT / 2 {
        SensorZone::Lower
    } else {
        SensorZone::Upper
    }
}

/// Ordered pressure readings for one foot.
///
/// Readings arrive in frames of [`SENSOR_COUNT`] values, so the set always
/// holds a multiple of eight readings with the lower/upper partition applied
/// per contiguous block. [`append`](Self::append) is additive: each frame
/// grows the set, and zone sums cover the full history. Callers that want
/// snapshot semantics use [`replace`](Self::replace) instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FootSensorSet {
    readings: Vec<SensorReading>,
}

impl FootSensorSet {
    /// Create a set from an initial frame of eight pressure values.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::SensorCountMismatch`] if `values` does not
    /// contain exactly [`SENSOR_COUNT`] elements.
    pub fn new(values: &[u32]) -> Result<Self> {
        let mut set = Self::default();
        set.append(values)?;
        Ok(set)
    }

    /// Append one frame of eight pressure values.
    ///
    /// The set grows by eight readings; nothing is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::SensorCountMismatch`] if `values` does not
    /// contain exactly [`SENSOR_COUNT`] elements. The set is unchanged on
    /// error.
    pub fn append(&mut self, values: &[u32]) -> Result<()> {
        if values.len() != SENSOR_COUNT {
            return Err(FusionError::sensor_count_mismatch(values.len()));
        }
        self.readings.extend(values.iter().enumerate().map(|(i, &v)| {
            SensorReading {
                zone: zone_for_index(i),
                magnitude: v,
            }
        }));
        Ok(())
    }

    /// Replace the entire set with one frame of eight pressure values.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::SensorCountMismatch`] if `values` does not
    /// contain exactly [`SENSOR_COUNT`] elements. The set is unchanged on
    /// error.
    pub fn replace(&mut self, values: &[u32]) -> Result<()> {
        if values.len() != SENSOR_COUNT {
            return Err(FusionError::sensor_count_mismatch(values.len()));
        }
        self.readings.clear();
        self.append(values)
    }

    /// Sum of all reading magnitudes matching `zone`.
    ///
    /// Returns 0 when nothing matches. `Whole` sums every reading in the
    /// set, historical appends included.
    #[must_use]
    pub fn sum(&self, zone: SensorZone) -> u64 {
        self.readings
            .iter()
            .filter(|r| r.matches(zone))
            .map(|r| u64::from(r.magnitude))
            .sum()
    }

    /// All readings matching `zone`, in original order.
    #[must_use]
    pub fn readings(&self, zone: SensorZone) -> Vec<SensorReading> {
        self.readings
            .iter()
            .filter(|r| r.matches(zone))
            .copied()
            .collect()
    }

    /// Total number of readings held, across all frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the set holds no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
