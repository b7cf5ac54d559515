//! Curve-reversal detection
//!
//! A curve is a run of samples during which the pointer keeps turning the
//! same way. Each new angle is compared with the previous one; the change is
//! read along the smaller arc, so a jump of more than half a circle counts as
//! turning the other way.
//!
//! ```text
//! NoDirection --[delta != 0]--> Clockwise <--[sign flip]--> CounterClockwise
//! ```

use super::angle::wrap_positive;
use super::sample::Sample;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Turning direction of the current curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveDirection {
    /// Angle increasing (+1)
    Clockwise,
    /// Angle decreasing (-1)
    CounterClockwise,
}

impl CurveDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(self) -> i8 {
        match self {
            CurveDirection::Clockwise => 1,
            CurveDirection::CounterClockwise => -1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CurveDirection::Clockwise => CurveDirection::CounterClockwise,
            CurveDirection::CounterClockwise => CurveDirection::Clockwise,
        }
    }
}

impl fmt::Display for CurveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveDirection::Clockwise => write!(f, "clockwise"),
            CurveDirection::CounterClockwise => write!(f, "counter_clockwise"),
        }
    }
}

/// Turning direction implied by a change from `prev` to `curr`.
///
/// Returns None when the angle did not change. A change of exactly half a
/// circle counts as clockwise.
pub fn turning_direction(prev: f64, curr: f64, max_angle: f64) -> Option<CurveDirection> {
    let delta = wrap_positive(curr - prev, max_angle);
    if delta == 0.0 {
        None
    } else if delta <= max_angle / 2.0 {
        Some(CurveDirection::Clockwise)
    } else {
        Some(CurveDirection::CounterClockwise)
    }
}

/// Where the current curve started
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveStart {
    pub direction: CurveDirection,
    pub angle: f64,
    /// Session index of the sample that produced `angle`
    pub index: usize,
    pub sample: Sample,
}

/// Curve-reversal state machine
#[derive(Debug, Clone, Default)]
pub struct CurveTracker {
    current: Option<CurveStart>,
    n_curves: usize,
}

impl CurveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the previous and the new angle.
    ///
    /// `index` and `sample` identify the sample that produced `curr`.
    /// Returns the new curve if one started.
    pub fn on_angle(
        &mut self,
        prev: Option<f64>,
        curr: Option<f64>,
        max_angle: f64,
        index: usize,
        sample: Sample,
    ) -> Option<CurveStart> {
        let (prev, curr) = match (prev, curr) {
            (Some(p), Some(c)) => (p, c),
            _ => return None,
        };

        let direction = turning_direction(prev, curr, max_angle)?;

        if self.direction() == Some(direction) {
            return None;
        }

        let start = CurveStart {
            direction,
            angle: curr,
            index,
            sample,
        };
        self.current = Some(start);
        self.n_curves += 1;

        debug!(
            direction = %direction,
            angle = curr,
            index,
            n_curves = self.n_curves,
            "New curve started"
        );

        Some(start)
    }

    pub fn direction(&self) -> Option<CurveDirection> {
        self.current.map(|c| c.direction)
    }

    pub fn start(&self) -> Option<&CurveStart> {
        self.current.as_ref()
    }

    pub fn start_angle(&self) -> Option<f64> {
        self.current.map(|c| c.angle)
    }

    pub fn start_index(&self) -> Option<usize> {
        self.current.map(|c| c.index)
    }

    pub fn start_sample(&self) -> Option<Sample> {
        self.current.map(|c| c.sample)
    }

    pub fn n_curves(&self) -> usize {
        self.n_curves
    }

    /// Back to NoDirection with zero curves
    pub fn reset(&mut self) {
        self.current = None;
        self.n_curves = 0;
    }
}
