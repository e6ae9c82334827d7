//! Insole Fusion Library
//!
//! Sensor-fusion core for a pair of wireless pressure-sensing insoles.
//!
//! Each insole reports an eight-element pressure frame per update. This
//! library accumulates those frames per foot, partitions them into upper
//! (toe) and lower (heel) zones, gates out noise-level contact, and folds
//! the gated zone sums into one of three independent control signals:
//!
//! - **Rotation**: a signed angle in radians driven by diagonal pressure
//!   pairs (a foot-twist gesture).
//! - **Scroll**: an offset driven by the whole-foot pressure difference
//!   between feet.
//! - **Slide**: a position on the same difference with the opposite sign,
//!   on its own accumulator.
//!
//! The core is a pure, single-threaded state-update function: the caller
//! owns a [`FusionState`], feeds frames in through [`FusionEngine::ingest`],
//! and applies whichever [`Effect`] the UI has selected. Device transport
//! (BLE discovery, payload parsing) and presentation (widgets, animation)
//! are external collaborators.
//!
//! # Quick Start
//!
//! ```
//! use insole_fusion::{Effect, FusionConfig, FusionEngine, FusionState};
//!
//! let engine = FusionEngine::new(FusionConfig::default());
//! let mut state = FusionState::new(&[0; 8], &[0; 8])?;
//!
//! // One hardware update per foot, then apply the selected effect.
//! engine.ingest(&mut state, &[12, 8, 10, 9, 0, 1, 0, 2], &[3, 2, 4, 1, 0, 0, 1, 0])?;
//! if let Some(angle) = engine.apply(&mut state, Effect::Rotate).value() {
//!     // hand `angle` (radians) to the presentation layer
//! }
//! # Ok::<(), insole_fusion::FusionError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod config;
pub mod engine;
pub mod error;
pub mod sensor;
pub mod state;

// Re-exports for convenient access
pub use config::{FusionConfig, IngestMode};
pub use engine::{
    normalize_rotation, normalize_scroll, normalize_slide, Effect, EffectOutcome, FusionEngine,
    ZoneAverages,
};
pub use error::{FusionError, Result};
pub use sensor::{FootSensorSet, SensorReading, SensorZone};
pub use state::FusionState;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of pressure cells per insole.
pub const SENSOR_COUNT: usize = 8;

/// Default minimum whole-foot pressure sum before accumulator updates apply.
pub const DEFAULT_SENSITIVITY_THRESHOLD: u64 = 25;

/// Number of zone-average display labels (one per foot/zone quadrant).
pub const LABEL_COUNT: usize = 4;

/// Full-scale raw pressure: all eight sensors at their nominal maximum of
/// 100. Normalization maps ±this many raw units onto the output range.
pub const FULL_SCALE_PRESSURE: u32 = SENSOR_COUNT as u32 * 100;
