//! Near-sample window
//!
//! Keeps the samples of the current trial and, for the newest one, locates
//! the most recent earlier sample that is far enough away to give a stable
//! direction. Sample indices are counted from the last [`clear`] and stay
//! valid when an optional bound drops the oldest samples.
//!
//! A bounded window only supports a zero minimal distance: with any positive
//! distance the reference can be arbitrarily old, so dropping samples would
//! change the result.
//!
//! [`clear`]: NearSampleWindow::clear

use super::sample::Sample;
use crate::{Error, Result};

/// Smallest bound that still leaves a previous sample to compare with
pub const MIN_BOUND: usize = 2;

fn check_bound(max_samples: usize) -> Result<usize> {
    if max_samples < MIN_BOUND {
        return Err(Error::InvalidArgument(format!(
            "NearSampleWindow: max_samples must be at least {} ({})",
            MIN_BOUND, max_samples
        )));
    }
    Ok(max_samples)
}

/// Append-only sample history with an index-based reference pointer
#[derive(Debug, Clone, Default)]
pub struct NearSampleWindow {
    samples: Vec<Sample>,
    /// Number of samples dropped from the front since the last clear
    evicted: usize,
    /// Session index of the reference sample
    reference: Option<usize>,
    /// Maximum retained samples (None = unbounded)
    max_samples: Option<usize>,
}

impl NearSampleWindow {
    /// Create an unbounded window
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a window that retains at most `max_samples` samples (at least 2)
    pub fn with_max_samples(max_samples: usize) -> Result<Self> {
        Ok(Self {
            max_samples: Some(check_bound(max_samples)?),
            ..Self::default()
        })
    }

    pub fn max_samples(&self) -> Option<usize> {
        self.max_samples
    }

    pub fn set_max_samples(&mut self, max_samples: Option<usize>) -> Result<()> {
        self.max_samples = max_samples.map(check_bound).transpose()?;
        self.enforce_bound();
        Ok(())
    }

    /// Record a sample and recompute the reference sample.
    ///
    /// `min_distance_units` is the minimum separation in spatial units
    /// (already converted from millimeters). Returns the session index of the
    /// new sample. A bounded window rejects a positive distance with
    /// `InvalidState` and records nothing.
    pub fn on_sample(&mut self, sample: Sample, min_distance_units: f64) -> Result<usize> {
        if self.max_samples.is_some() && min_distance_units > 0.0 {
            return Err(Error::InvalidState(format!(
                "NearSampleWindow.on_sample(): min_distance ({}) must be 0 when max_samples is set",
                min_distance_units
            )));
        }

        self.samples.push(sample);
        self.enforce_bound();

        let sq_min_distance = min_distance_units * min_distance_units;
        let newest = self.samples.len() - 1;

        self.reference = self.samples[..newest]
            .iter()
            .rposition(|s| s.distance_sq_to(sample.x, sample.y) >= sq_min_distance)
            .map(|i| i + self.evicted);

        Ok(self.evicted + newest)
    }

    /// The reference sample for the newest sample, if any
    pub fn reference(&self) -> Option<&Sample> {
        self.reference.and_then(|i| self.get(i))
    }

    /// Session index of the reference sample
    pub fn reference_index(&self) -> Option<usize> {
        self.reference
    }

    /// The newest sample
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Session index of the newest sample
    pub fn latest_index(&self) -> Option<usize> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.evicted + self.samples.len() - 1)
        }
    }

    /// Look up a sample by session index; None if never recorded or dropped
    pub fn get(&self, index: usize) -> Option<&Sample> {
        index
            .checked_sub(self.evicted)
            .and_then(|i| self.samples.get(i))
    }

    /// Retained samples, oldest first
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total samples recorded since the last clear, including dropped ones
    pub fn total_samples(&self) -> usize {
        self.evicted + self.samples.len()
    }

    /// Forget all samples (the bound is kept)
    pub fn clear(&mut self) {
        self.samples.clear();
        self.evicted = 0;
        self.reference = None;
    }

    fn enforce_bound(&mut self) {
        let Some(max) = self.max_samples else {
            return;
        };
        if self.samples.len() > max {
            let excess = self.samples.len() - max;
            self.samples.drain(..excess);
            self.evicted += excess;
            if self.reference.is_some_and(|r| r < self.evicted) {
                self.reference = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: f64, y: f64, t: f64) -> Sample {
        Sample::new(x, y, t)
    }

    #[test]
    fn test_first_sample_has_no_reference() {
        let mut window = NearSampleWindow::new();
        let index = window.on_sample(s(0.0, 0.0, 0.0), 0.0).unwrap();
        assert_eq!(index, 0);
        assert!(window.reference().is_none());
    }

    #[test]
    fn test_zero_distance_picks_previous_sample() {
        let mut window = NearSampleWindow::new();
        window.on_sample(s(0.0, 0.0, 0.0), 0.0).unwrap();
        window.on_sample(s(1.0, 0.0, 1.0), 0.0).unwrap();
        window.on_sample(s(2.0, 0.0, 2.0), 0.0).unwrap();
        assert_eq!(window.reference_index(), Some(1));
        assert_eq!(window.reference(), Some(&s(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_picks_most_recent_far_enough_sample() {
        let mut window = NearSampleWindow::new();
        window.on_sample(s(0.0, 0.0, 0.0), 5.0).unwrap();
        window.on_sample(s(3.0, 0.0, 1.0), 5.0).unwrap();
        window.on_sample(s(4.0, 0.0, 2.0), 5.0).unwrap();
        // Only the first sample is at least 5 units from (6, 0)
        window.on_sample(s(6.0, 0.0, 3.0), 5.0).unwrap();
        assert_eq!(window.reference_index(), Some(0));
    }

    #[test]
    fn test_near_samples_give_no_reference() {
        let mut window = NearSampleWindow::new();
        window.on_sample(s(0.0, 0.0, 0.0), 10.0).unwrap();
        window.on_sample(s(1.0, 1.0, 1.0), 10.0).unwrap();
        window.on_sample(s(2.0, 2.0, 2.0), 10.0).unwrap();
        assert!(window.reference().is_none());
    }

    #[test]
    fn test_distance_boundary_is_inclusive() {
        let mut window = NearSampleWindow::new();
        window.on_sample(s(0.0, 0.0, 0.0), 5.0).unwrap();
        window.on_sample(s(3.0, 4.0, 1.0), 5.0).unwrap();
        assert_eq!(window.reference_index(), Some(0));
    }

    #[test]
    fn test_reference_recomputed_each_sample() {
        let mut window = NearSampleWindow::new();
        window.on_sample(s(0.0, 0.0, 0.0), 5.0).unwrap();
        window.on_sample(s(10.0, 0.0, 1.0), 5.0).unwrap();
        assert_eq!(window.reference_index(), Some(0));

        // Moving back next to the origin: sample 1 is far, sample 0 is near
        window.on_sample(s(1.0, 0.0, 2.0), 5.0).unwrap();
        assert_eq!(window.reference_index(), Some(1));
    }

    #[test]
    fn test_history_is_retained() {
        let mut window = NearSampleWindow::new();
        for i in 0..100 {
            window.on_sample(s(i as f64, 0.0, i as f64), 1.0).unwrap();
        }
        assert_eq!(window.len(), 100);
        assert_eq!(window.latest_index(), Some(99));
    }

    #[test]
    fn test_bounded_window_keeps_session_indices() {
        let mut window = NearSampleWindow::with_max_samples(4).unwrap();
        for i in 0..10 {
            window.on_sample(s(i as f64, 0.0, i as f64), 0.0).unwrap();
        }
        assert_eq!(window.len(), 4);
        assert_eq!(window.total_samples(), 10);
        assert_eq!(window.latest_index(), Some(9));
        assert_eq!(window.reference_index(), Some(8));
        assert!(window.get(5).is_none());
        assert_eq!(window.get(6), Some(&s(6.0, 0.0, 6.0)));
    }

    #[test]
    fn test_bound_below_two_is_rejected() {
        assert!(NearSampleWindow::with_max_samples(0).unwrap_err().is_invalid_argument());
        assert!(NearSampleWindow::with_max_samples(1).unwrap_err().is_invalid_argument());

        let mut window = NearSampleWindow::with_max_samples(2).unwrap();
        window.on_sample(s(0.0, 0.0, 0.0), 0.0).unwrap();
        window.on_sample(s(1.0, 0.0, 1.0), 0.0).unwrap();
        assert!(window.reference().is_some());

        assert!(window.set_max_samples(Some(1)).is_err());
        assert_eq!(window.max_samples(), Some(2));
    }

    #[test]
    fn test_bounded_window_rejects_positive_distance() {
        let mut window = NearSampleWindow::with_max_samples(3).unwrap();
        for i in 0..3 {
            window.on_sample(s(i as f64, 0.0, i as f64), 0.0).unwrap();
        }

        let err = window.on_sample(s(6.0, 0.0, 6.0), 5.0).unwrap_err();
        assert!(err.is_invalid_state());
        // Nothing was recorded
        assert_eq!(window.total_samples(), 3);
        assert_eq!(window.reference_index(), Some(1));

        window.set_max_samples(None).unwrap();
        assert_eq!(window.on_sample(s(6.0, 0.0, 6.0), 5.0).unwrap(), 3);
        assert_eq!(window.reference_index(), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut window = NearSampleWindow::with_max_samples(3).unwrap();
        for i in 0..5 {
            window.on_sample(s(i as f64, 0.0, i as f64), 0.0).unwrap();
        }
        window.clear();
        assert!(window.is_empty());
        assert!(window.reference().is_none());
        assert_eq!(window.total_samples(), 0);
        assert_eq!(window.max_samples(), Some(3));
        assert_eq!(window.on_sample(s(0.0, 0.0, 0.0), 0.0).unwrap(), 0);
    }
}
