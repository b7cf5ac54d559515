//! Trajectory recording
//!
//! Stores the raw `(x, y, t)` stream of each trial and appends it to a CSV
//! file. This runs next to the direction monitor on the same sample feed.
//! Recorded files can be replayed through the monitor offline.

pub mod replay;
pub mod trajectory_tracker;

pub use replay::{SampleAnalysis, TrialAnalysis, TrialSummary};
pub use trajectory_tracker::{TrajectoryRow, TrajectoryTracker, CSV_HEADER};
