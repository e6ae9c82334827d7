//! Configuration for the fusion engine.
//!
//! This module provides the [`FusionConfig`] struct which centralizes the
//! engine's tunable parameters: the pressure gate threshold and the frame
//! ingestion mode.
//!
//! # Example
//!
//! ```
//! use insole_fusion::{FusionConfig, IngestMode};
//!
//! // Default configuration (append-mode, threshold 25)
//! let config = FusionConfig::default();
//!
//! // Snapshot ingestion for long-running sessions
//! let config = FusionConfig::snapshot();
//! assert_eq!(config.ingest_mode, IngestMode::Replace);
//! ```

use crate::error::{FusionError, Result};
use crate::DEFAULT_SENSITIVITY_THRESHOLD;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an incoming sensor frame is folded into a foot's reading set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IngestMode {
    /// Each frame appends eight new readings; the set grows without bound
    /// and zone sums reflect the whole session history. This reproduces the
    /// original demo hardware behavior.
    #[default]
    Append,
    /// Each frame replaces the previous one; zone sums reflect only the
    /// current snapshot. Bounded memory, suitable for long sessions.
    Replace,
}

/// Configuration for the fusion engine.
///
/// All parameters have hardware-matched defaults. The sensor count itself is
/// fixed at [`crate::SENSOR_COUNT`] and is not configurable: the insole
/// hardware always reports eight pressure cells per foot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusionConfig {
    /// Minimum whole-foot pressure sum (either foot) required before any
    /// accumulator update is allowed. Contact below this level is treated
    /// as noise and skipped.
    pub sensitivity_threshold: u64,

    /// Frame ingestion mode.
    pub ingest_mode: IngestMode,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            sensitivity_threshold: DEFAULT_SENSITIVITY_THRESHOLD,
            ingest_mode: IngestMode::Append,
        }
    }
}

impl FusionConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        // A zero threshold would let idle sensor noise drive the UI.
        if self.sensitivity_threshold == 0 {
            return Err(FusionError::invalid_config(
                "sensitivity_threshold must be positive",
            ));
        }
        Ok(())
    }

    /// Preset with snapshot (replace-mode) ingestion.
    ///
    /// Each frame stands alone, so zone sums track current pressure rather
    /// than session history and memory stays bounded.
    #[must_use]
    pub fn snapshot() -> Self {
        Self {
            ingest_mode: IngestMode::Replace,
            ..Self::default()
        }
    }

    /// Set the sensitivity threshold.
    #[must_use]
    pub const fn with_sensitivity_threshold(mut self, threshold: u64) -> Self {
        self.sensitivity_threshold = threshold;
        self
    }

    /// Set the ingestion mode.
    #[must_use]
    pub const fn with_ingest_mode(mut self, mode: IngestMode) -> Self {
        self.ingest_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FusionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sensitivity_threshold, 25);
        assert_eq!(config.ingest_mode, IngestMode::Append);
    }

    #[test]
    fn test_snapshot_preset() {
        let config = FusionConfig::snapshot();
        assert!(config.validate().is_ok());
        assert_eq!(config.ingest_mode, IngestMode::Replace);
        assert_eq!(config.sensitivity_threshold, 25);
    }

    #[test]
    fn test_validation() {
        let config = FusionConfig::default().with_sensitivity_threshold(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = FusionConfig::new()
            .with_sensitivity_threshold(40)
            .with_ingest_mode(IngestMode::Replace);
        assert_eq!(config.sensitivity_threshold, 40);
        assert_eq!(config.ingest_mode, IngestMode::Replace);
    }
}
