//! Timestamped pointer positions

use serde::{Deserialize, Serialize};

/// One position reading from the finger/mouse/stylus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    /// Time in caller-defined units (usually seconds since trial start)
    pub t: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Squared Euclidean distance to a position
    pub fn distance_sq_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another sample
    pub fn distance_to(&self, other: &Sample) -> f64 {
        self.distance_sq_to(other.x, other.y).sqrt()
    }

    /// Position only, as an `(x, y)` pair
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64, f64)> for Sample {
    fn from((x, y, t): (f64, f64, f64)) -> Self {
        Self::new(x, y, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Sample::new(0.0, 0.0, 0.0);
        let b = Sample::new(3.0, 4.0, 1.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.distance_sq_to(3.0, 4.0), 25.0);
    }

    #[test]
    fn test_from_tuple() {
        let s: Sample = (1.0, 2.0, 3.0).into();
        assert_eq!(s, Sample::new(1.0, 2.0, 3.0));
        assert_eq!(s.xy(), (1.0, 2.0));
    }
}
