//! Circular trajectory generator
//!
//! Produces positions on a circle as a function of time. Used to drive the
//! direction monitor and the trajectory recorder without a real pointer.
//! Angles follow the same convention as the monitor: 0 is up and positive
//! speed moves clockwise.

use crate::validation::{require_finite, require_positive};
use crate::{Error, Result};
use tracing::trace;

const OWNER: &str = "CircularTrajectoryGenerator";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircularTrajectoryGenerator {
    center: Option<(i32, i32)>,
    radius: Option<f64>,
    degrees_per_sec: Option<f64>,
    degrees_at_t0: f64,
}

impl CircularTrajectoryGenerator {
    /// Create an unconfigured generator; set center, radius and speed before sampling
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_center(mut self, x: i32, y: i32) -> Self {
        self.center = Some((x, y));
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Result<Self> {
        self.set_radius(radius)?;
        Ok(self)
    }

    pub fn with_degrees_per_sec(mut self, degrees_per_sec: f64) -> Result<Self> {
        self.set_degrees_per_sec(degrees_per_sec)?;
        Ok(self)
    }

    pub fn with_degrees_at_t0(mut self, degrees: f64) -> Result<Self> {
        self.set_degrees_at_t0(degrees)?;
        Ok(self)
    }

    pub fn center(&self) -> Option<(i32, i32)> {
        self.center
    }

    pub fn set_center(&mut self, x: i32, y: i32) {
        self.center = Some((x, y));
        trace!(field = "center", x, y, "{} setting changed", OWNER);
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        require_positive(OWNER, "radius", radius)?;
        self.radius = Some(radius);
        trace!(field = "radius", value = radius, "{} setting changed", OWNER);
        Ok(())
    }

    pub fn degrees_per_sec(&self) -> Option<f64> {
        self.degrees_per_sec
    }

    pub fn set_degrees_per_sec(&mut self, degrees_per_sec: f64) -> Result<()> {
        require_positive(OWNER, "degrees_per_sec", degrees_per_sec)?;
        self.degrees_per_sec = Some(degrees_per_sec);
        trace!(field = "degrees_per_sec", value = degrees_per_sec, "{} setting changed", OWNER);
        Ok(())
    }

    /// Seconds per full rotation
    pub fn full_rotation_duration(&self) -> Option<f64> {
        self.degrees_per_sec.map(|d| 360.0 / d)
    }

    pub fn set_full_rotation_duration(&mut self, seconds: f64) -> Result<()> {
        require_positive(OWNER, "full_rotation_duration", seconds)?;
        self.set_degrees_per_sec(360.0 / seconds)
    }

    /// Angle (degrees) of the position at time 0
    pub fn degrees_at_t0(&self) -> f64 {
        self.degrees_at_t0
    }

    pub fn set_degrees_at_t0(&mut self, degrees: f64) -> Result<()> {
        require_finite(OWNER, "degrees_at_t0", degrees)?;
        self.degrees_at_t0 = degrees;
        trace!(field = "degrees_at_t0", value = degrees, "{} setting changed", OWNER);
        Ok(())
    }

    /// Position at time `time` (seconds), rounded to whole units.
    ///
    /// Fails with `InvalidArgument` when the position does not fit in `i32`.
    pub fn get_xy(&self, time: f64) -> Result<(i32, i32)> {
        let (center, radius, degrees_per_sec) =
            match (self.center, self.radius, self.degrees_per_sec) {
                (Some(c), Some(r), Some(d)) => (c, r, d),
                _ => {
                    return Err(Error::InvalidState(format!(
                        "{}.get_xy() was called without setting center, radius and degrees_per_sec",
                        OWNER
                    )))
                }
            };
        require_finite("CircularTrajectoryGenerator.get_xy()", "time", time)?;

        let angle = (self.degrees_at_t0 + time * degrees_per_sec).to_radians();
        let x = offset_coord("x", center.0, radius * angle.sin())?;
        let y = offset_coord("y", center.1, radius * angle.cos())?;
        Ok((x, y))
    }
}

/// `center + offset` rounded, or an error if it leaves the `i32` range
fn offset_coord(name: &str, center: i32, offset: f64) -> Result<i32> {
    let value = f64::from(center) + offset.round();
    if !value.is_finite() || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(Error::InvalidArgument(format!(
            "{}.get_xy(): {} = {} + {} is out of range",
            OWNER, name, center, offset
        )));
    }
    Ok(value as i32)
}
