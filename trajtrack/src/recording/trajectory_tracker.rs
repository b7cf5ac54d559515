//! Trajectory Tracker
//!
//! Records every tracked point of the current trial and saves trials to a
//! CSV file with one `trial,time,x,y` row per point.

use crate::movement::sample::Sample;
use crate::validation::{require_finite, require_not_negative};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header row of the trajectory file
pub const CSV_HEADER: [&str; 4] = ["trial", "time", "x", "y"];

/// Default decimal places for coordinates
pub const DEFAULT_XY_PRECISION: usize = 5;

/// Default decimal places for time
pub const DEFAULT_TIME_PRECISION: usize = 3;

/// One row of a trajectory file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub trial: u32,
    pub time: f64,
    pub x: f64,
    pub y: f64,
}

impl TrajectoryRow {
    pub fn sample(&self) -> Sample {
        Sample::new(self.x, self.y, self.time)
    }
}

/// Output file settings, set by [`TrajectoryTracker::init_output_file`]
#[derive(Debug, Clone)]
struct OutputFile {
    path: PathBuf,
    xy_precision: usize,
    time_precision: usize,
}

/// Track mouse/finger movement of the current trial
#[derive(Debug, Clone, Default)]
pub struct TrajectoryTracker {
    tracking_active: bool,
    samples: Vec<Sample>,
    output: Option<OutputFile>,
}

impl TrajectoryTracker {
    /// Create a tracker with tracking inactive
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracking(tracking_active: bool) -> Self {
        Self {
            tracking_active,
            ..Self::default()
        }
    }

    /// When inactive, calls to [`update`](Self::update) are ignored
    pub fn tracking_active(&self) -> bool {
        self.tracking_active
    }

    pub fn set_tracking_active(&mut self, active: bool) {
        self.tracking_active = active;
        tracing::trace!(field = "tracking_active", value = active, "TrajectoryTracker setting changed");
    }

    /// Forget previously tracked points, optionally toggling tracking
    pub fn reset(&mut self, tracking_active: Option<bool>) {
        if let Some(active) = tracking_active {
            self.set_tracking_active(active);
        }
        self.samples.clear();
        debug!("Trajectory reset");
    }

    /// Track a point. Does nothing while tracking is inactive.
    pub fn update(&mut self, x: f64, y: f64, time: f64) -> Result<()> {
        if !self.tracking_active {
            return Ok(());
        }

        const OWNER: &str = "TrajectoryTracker.update()";
        require_finite(OWNER, "x", x)?;
        require_finite(OWNER, "y", y)?;
        require_not_negative(OWNER, "time", time)?;

        self.samples.push(Sample::new(x, y, time));
        tracing::trace!(x, y, time, "Trajectory point tracked");
        Ok(())
    }

    /// Points tracked since the last reset
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Path of the output file, once initialized
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_ref().map(|o| o.path.as_path())
    }

    /// Create (or truncate) the CSV output file and write its header
    pub fn init_output_file(
        &mut self,
        path: impl AsRef<Path>,
        xy_precision: usize,
        time_precision: usize,
    ) -> Result<()> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_writer(File::create(&path)?);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;

        info!(path = %path.display(), "Trajectory output file initialized");

        self.output = Some(OutputFile {
            path,
            xy_precision,
            time_precision,
        });
        Ok(())
    }

    /// Append the points tracked since the last reset to the output file.
    ///
    /// Returns the number of rows written.
    pub fn save_to_file(&self, trial: u32) -> Result<usize> {
        let output = self.output.as_ref().ok_or_else(|| {
            Error::InvalidState(
                "TrajectoryTracker.save_to_file() was called before calling init_output_file()"
                    .to_string(),
            )
        })?;

        let file = OpenOptions::new().append(true).open(&output.path)?;
        let mut writer = csv::Writer::from_writer(file);

        for s in &self.samples {
            writer.write_record([
                trial.to_string(),
                format!("{:.*}", output.time_precision, s.t),
                format_coord(s.x, output.xy_precision),
                format_coord(s.y, output.xy_precision),
            ])?;
        }
        writer.flush()?;

        info!(
            path = %output.path.display(),
            trial,
            rows = self.samples.len(),
            "Trajectory saved"
        );

        Ok(self.samples.len())
    }

    /// Read every row of a trajectory file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<TrajectoryRow>> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let rows = reader
            .deserialize::<TrajectoryRow>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Whole-number coordinates (typical for pixel input) are written without decimals
fn format_coord(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.*}", precision, value)
    }
}
