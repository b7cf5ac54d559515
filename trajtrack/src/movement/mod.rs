//! Movement analysis
//!
//! Turns a stream of timestamped pointer positions into a direction of
//! travel and a count of the curves in the trajectory:
//! - Near-sample window that picks a far-enough reference position
//! - Angle estimation with a configurable zero direction
//! - Curve-reversal state machine (smaller-arc rule)
//! - Circular trajectory generator for driving the pipeline without a pointer

pub mod sample;
pub mod angle;
pub mod window;
pub mod curve;
pub mod direction_monitor;
pub mod circular;

pub use sample::Sample;
pub use angle::{AngleEstimator, AngleUnits};
pub use window::NearSampleWindow;
pub use curve::{CurveDirection, CurveStart, CurveTracker};
pub use direction_monitor::{DirectionConfig, DirectionMonitor, DirectionSnapshot};
pub use circular::CircularTrajectoryGenerator;
