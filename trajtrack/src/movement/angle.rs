//! Direction-of-travel angle estimation
//!
//! Angles use a screen-independent convention: 0 points up (+y) and angles
//! grow clockwise, so +x is a quarter turn. Raw angles lie in
//! `[0, max_angle)`; when a zero angle is configured the reported angle is
//! signed relative to it and lies in `(-max_angle/2, max_angle/2]`.

use super::sample::Sample;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Units for all angle inputs and outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnits {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnits {
    /// A full circle in these units
    pub fn max_angle(self) -> f64 {
        match self {
            AngleUnits::Degrees => 360.0,
            AngleUnits::Radians => TAU,
        }
    }

    /// Convert an angle given in radians into these units
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleUnits::Degrees => radians / TAU * 360.0,
            AngleUnits::Radians => radians,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AngleUnits::Degrees => "degrees",
            AngleUnits::Radians => "radians",
        }
    }
}

impl fmt::Display for AngleUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AngleUnits {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrees" | "deg" => Ok(AngleUnits::Degrees),
            "radians" | "rad" => Ok(AngleUnits::Radians),
            other => Err(crate::Error::InvalidArgument(format!(
                "angle_units was set to an invalid value ({}); expected degrees or radians",
                other
            ))),
        }
    }
}

/// Reduce a value into `[0, modulus)`.
///
/// `rem_euclid` can round up to `modulus` itself for tiny negative inputs.
pub(crate) fn wrap_positive(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    if wrapped >= modulus {
        0.0
    } else {
        wrapped
    }
}

/// Direction of the vector `from -> to`, in radians within `[0, 2π)`
///
/// Identical points yield 0.
pub fn raw_direction(from: &Sample, to: &Sample) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    wrap_positive(dx.atan2(dy), TAU)
}

/// Converts a pair of samples into a reported angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleEstimator {
    pub units: AngleUnits,
    /// Angle (in `units`) that is reported as zero
    pub zero_angle: f64,
}

impl AngleEstimator {
    pub fn new(units: AngleUnits, zero_angle: f64) -> Self {
        Self { units, zero_angle }
    }

    /// Angle of travel from `prev` to `curr`
    pub fn estimate(&self, prev: &Sample, curr: &Sample) -> f64 {
        self.normalize(raw_direction(prev, curr))
    }

    /// Convert a raw direction (radians) into configured units and offset
    pub fn normalize(&self, radians: f64) -> f64 {
        let angle = self.units.from_radians(radians);

        if self.zero_angle == 0.0 {
            return angle;
        }

        let max_angle = self.units.max_angle();
        let shifted = wrap_positive(angle - self.zero_angle, max_angle);
        if shifted > max_angle / 2.0 {
            shifted - max_angle
        } else {
            shifted
        }
    }

    pub fn max_angle(&self) -> f64 {
        self.units.max_angle()
    }
}

impl Default for AngleEstimator {
    fn default() -> Self {
        Self::new(AngleUnits::Degrees, 0.0)
    }
}
