//! Error types for sensor fusion operations.
//!
//! All failure in this crate is local input-shape validation; there are no
//! fatal or unrecoverable conditions. A below-threshold pressure reading is
//! *not* an error — see [`crate::engine::EffectOutcome`].

use thiserror::Error;

use crate::SENSOR_COUNT;

/// Main error type for sensor fusion operations.
#[derive(Error, Debug)]
pub enum FusionError {
    /// Input validation errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A sensor frame did not contain exactly one value per sensor.
    #[error("Sensor frame length mismatch: expected {expected} values, got {actual}")]
    SensorCountMismatch { expected: usize, actual: usize },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for sensor fusion operations.
pub type Result<T> = std::result::Result<T, FusionError>;

impl FusionError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a sensor count mismatch error for a frame of `actual` values.
    #[must_use]
    pub const fn sensor_count_mismatch(actual: usize) -> Self {
        Self::SensorCountMismatch {
            expected: SENSOR_COUNT,
            actual,
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
