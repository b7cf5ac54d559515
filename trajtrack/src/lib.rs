//! # TrajTrack
//!
//! Real-time pointer-movement analysis for interactive behavioral experiments.
//!
//! ## Overview
//!
//! As a participant moves a finger, mouse or stylus, the experiment feeds
//! every timestamped position into a [`DirectionMonitor`]. The monitor keeps
//! a running estimate of the direction of travel and counts the curves in the
//! path, i.e. the points where the turning direction flips between clockwise
//! and counter-clockwise. Experiment logic polls it after each update to
//! detect hesitation, U-turns and handedness of curvature.
//!
//! ## Quick Start
//!
//! ```
//! use trajtrack::{AngleUnits, CurveDirection, DirectionConfig, DirectionMonitor};
//!
//! let config = DirectionConfig::new(1.0)
//!     .with_min_distance(0.0)
//!     .with_angle_units(AngleUnits::Degrees);
//! let mut monitor = DirectionMonitor::new(config).expect("valid config");
//!
//! // Trial start
//! monitor.reset();
//!
//! for (x, y, t) in [(0.0, 0.0, 0.0), (10.0, 0.0, 0.1), (10.0, 10.0, 0.2)] {
//!     monitor.update(x, y, t).expect("valid sample");
//! }
//!
//! assert_eq!(monitor.curr_angle(), Some(0.0));
//! assert_eq!(monitor.curr_curve_direction(), Some(CurveDirection::CounterClockwise));
//! assert_eq!(monitor.n_curves(), 1);
//! ```
//!
//! ## Architecture
//!
//! - [`movement`]: direction estimation, curve detection and the circular
//!   trajectory generator
//! - [`recording`]: raw trajectory recording to CSV and offline replay
//! - [`app`]: CLI and configuration management
//!
//! ## Sample Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ update(xyt) │───▶│ Near-Sample │───▶│    Angle    │───▶│    Curve    │
//! │             │    │   Window    │    │  Estimator  │    │   Tracker   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐    ┌─────────────┐
//! │ Trajectory  │───▶│  CSV file   │
//! │  Tracker    │    │ (per trial) │
//! └─────────────┘    └─────────────┘
//! ```

pub mod movement;
pub mod recording;
pub mod app;

mod validation;

// Re-export commonly used types
pub use movement::angle::{AngleEstimator, AngleUnits};
pub use movement::circular::CircularTrajectoryGenerator;
pub use movement::curve::{CurveDirection, CurveTracker};
pub use movement::direction_monitor::{DirectionConfig, DirectionMonitor, DirectionSnapshot};
pub use movement::sample::Sample;
pub use movement::window::NearSampleWindow;
pub use recording::{TrajectoryRow, TrajectoryTracker};

/// Result type alias for trajtrack
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trajtrack
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was caused by an invalid argument value
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Whether this error was caused by calling an operation too early
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::InvalidState(_))
    }
}
