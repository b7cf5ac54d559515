//! Direction Monitor
//!
//! Tracks the direction of finger/mouse movement and the curves along the
//! trajectory. Feed every position through [`DirectionMonitor::update`] and
//! read the accessors afterwards; call [`DirectionMonitor::reset`] when a
//! trial starts.

use super::angle::{AngleEstimator, AngleUnits};
use super::curve::{CurveDirection, CurveTracker};
use super::sample::Sample;
use super::window::{NearSampleWindow, MIN_BOUND};
use crate::validation::{require_finite, require_not_negative, require_positive};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Options for a [`DirectionMonitor`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionConfig {
    /// Spatial units per millimeter; only used to interpret `min_distance`
    pub units_per_mm: f64,
    /// Minimal distance (mm) between two samples for computing a direction
    pub min_distance: f64,
    pub angle_units: AngleUnits,
    /// Angle (in `angle_units`) that counts as zero. 0 = up.
    pub zero_angle: f64,
    /// Optional bound on retained samples per trial (at least 2). Only
    /// allowed with a zero `min_distance`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
}

impl DirectionConfig {
    pub fn new(units_per_mm: f64) -> Self {
        Self {
            units_per_mm,
            min_distance: 0.0,
            angle_units: AngleUnits::Degrees,
            zero_angle: 0.0,
            max_samples: None,
        }
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_angle_units(mut self, angle_units: AngleUnits) -> Self {
        self.angle_units = angle_units;
        self
    }

    pub fn with_zero_angle(mut self, zero_angle: f64) -> Self {
        self.zero_angle = zero_angle;
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = Some(max_samples);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("DirectionMonitor", "units_per_mm", self.units_per_mm)?;
        require_not_negative("DirectionMonitor", "min_distance", self.min_distance)?;
        require_finite("DirectionMonitor", "zero_angle", self.zero_angle)?;

        if let Some(max) = self.max_samples {
            if max < MIN_BOUND {
                return Err(Error::InvalidArgument(format!(
                    "DirectionMonitor: max_samples must be at least {} ({})",
                    MIN_BOUND, max
                )));
            }
            if self.min_distance > 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "DirectionMonitor: max_samples requires min_distance == 0 ({})",
                    self.min_distance
                )));
            }
        }
        Ok(())
    }

    /// Minimal distance converted to spatial units
    fn min_distance_units(&self) -> f64 {
        self.min_distance * self.units_per_mm
    }
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Point-in-time view of the monitor state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionSnapshot {
    pub angle: Option<f64>,
    pub curve_direction: Option<CurveDirection>,
    pub curve_start_angle: Option<f64>,
    pub curve_start_index: Option<usize>,
    pub n_curves: usize,
}

/// Monitor the mouse/finger direction and the curves in its trajectory
#[derive(Debug, Clone)]
pub struct DirectionMonitor {
    config: DirectionConfig,
    window: NearSampleWindow,
    curves: CurveTracker,
    curr_angle: Option<f64>,
}

impl DirectionMonitor {
    /// Create a monitor; fails if any option is out of range
    pub fn new(config: DirectionConfig) -> Result<Self> {
        config.validate()?;

        let window = match config.max_samples {
            Some(max) => NearSampleWindow::with_max_samples(max)?,
            None => NearSampleWindow::new(),
        };

        Ok(Self {
            config,
            window,
            curves: CurveTracker::new(),
            curr_angle: None,
        })
    }

    /// Create a monitor with default options and the given scale
    pub fn with_units_per_mm(units_per_mm: f64) -> Result<Self> {
        Self::new(DirectionConfig::new(units_per_mm))
    }

    //-- Runtime API: update movement

    /// Forget any previous movement (call when a trial starts)
    pub fn reset(&mut self) {
        self.window.clear();
        self.curves.reset();
        self.curr_angle = None;
        debug!("DirectionMonitor reset");
    }

    /// Call whenever the finger/mouse moves.
    ///
    /// Coordinates must be finite; time must be finite and non-negative.
    /// On error the monitor is left untouched.
    pub fn update(&mut self, x: f64, y: f64, time: f64) -> Result<()> {
        const OWNER: &str = "DirectionMonitor.update()";
        require_finite(OWNER, "x", x)?;
        require_finite(OWNER, "y", y)?;
        require_not_negative(OWNER, "time", time)?;

        let sample = Sample::new(x, y, time);
        let index = self
            .window
            .on_sample(sample, self.config.min_distance_units())?;

        let prev_angle = self.curr_angle;
        let estimator = self.estimator();
        self.curr_angle = self
            .window
            .reference()
            .map(|reference| estimator.estimate(reference, &sample));

        self.curves.on_angle(
            prev_angle,
            self.curr_angle,
            self.config.angle_units.max_angle(),
            index,
            sample,
        );

        Ok(())
    }

    fn estimator(&self) -> AngleEstimator {
        AngleEstimator::new(self.config.angle_units, self.config.zero_angle)
    }

    //-- Runtime API: get info

    /// The angle where the finger/mouse is now going
    pub fn curr_angle(&self) -> Option<f64> {
        self.curr_angle
    }

    /// The direction the finger/mouse is currently turning
    pub fn curr_curve_direction(&self) -> Option<CurveDirection> {
        self.curves.direction()
    }

    /// The movement angle at the beginning of the current curve
    pub fn curr_curve_start_angle(&self) -> Option<f64> {
        self.curves.start_angle()
    }

    /// Coordinates and time at the beginning of the current curve
    pub fn curr_curve_start_sample(&self) -> Option<Sample> {
        self.curves.start_sample()
    }

    /// Index (since the last reset) of the sample that started the current curve
    pub fn curr_curve_start_index(&self) -> Option<usize> {
        self.curves.start_index()
    }

    /// Number of curves since the last reset
    pub fn n_curves(&self) -> usize {
        self.curves.n_curves()
    }

    /// Samples recorded since the last reset
    pub fn n_samples(&self) -> usize {
        self.window.total_samples()
    }

    pub fn snapshot(&self) -> DirectionSnapshot {
        DirectionSnapshot {
            angle: self.curr_angle,
            curve_direction: self.curr_curve_direction(),
            curve_start_angle: self.curr_curve_start_angle(),
            curve_start_index: self.curr_curve_start_index(),
            n_curves: self.n_curves(),
        }
    }

    //-- Configuration

    pub fn config(&self) -> &DirectionConfig {
        &self.config
    }

    pub fn units_per_mm(&self) -> f64 {
        self.config.units_per_mm
    }

    pub fn min_distance(&self) -> f64 {
        self.config.min_distance
    }

    /// Fails with `InvalidState` for a positive value when the session is
    /// bounded by `max_samples`
    pub fn set_min_distance(&mut self, value: f64) -> Result<()> {
        require_not_negative("DirectionMonitor", "min_distance", value)?;
        if self.config.max_samples.is_some() && value > 0.0 {
            return Err(Error::InvalidState(format!(
                "DirectionMonitor.set_min_distance(): {} needs an unbounded session (max_samples = {:?})",
                value, self.config.max_samples
            )));
        }
        self.config.min_distance = value;
        trace!(field = "min_distance", value, "DirectionMonitor setting changed");
        Ok(())
    }

    pub fn angle_units(&self) -> AngleUnits {
        self.config.angle_units
    }

    pub fn set_angle_units(&mut self, value: AngleUnits) {
        self.config.angle_units = value;
        trace!(field = "angle_units", value = %value, "DirectionMonitor setting changed");
    }

    /// Parse and set the angle units ("degrees" or "radians")
    pub fn set_angle_units_str(&mut self, value: &str) -> Result<()> {
        let units = value.parse::<AngleUnits>()?;
        self.set_angle_units(units);
        Ok(())
    }

    pub fn zero_angle(&self) -> f64 {
        self.config.zero_angle
    }

    pub fn set_zero_angle(&mut self, value: f64) -> Result<()> {
        require_finite("DirectionMonitor", "zero_angle", value)?;
        self.config.zero_angle = value;
        trace!(field = "zero_angle", value, "DirectionMonitor setting changed");
        Ok(())
    }
}
