//! Offline replay of recorded trajectories
//!
//! Groups the rows of a trajectory file by trial and feeds each trial through
//! a [`DirectionMonitor`], the same way an experiment feeds live samples.

use super::trajectory_tracker::{TrajectoryRow, TrajectoryTracker};
use crate::movement::circular::CircularTrajectoryGenerator;
use crate::movement::curve::CurveDirection;
use crate::movement::direction_monitor::DirectionMonitor;
use crate::movement::sample::Sample;
use crate::validation::require_positive;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info};

/// Monitor state after one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleAnalysis {
    pub trial: u32,
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub angle: Option<f64>,
    pub curve_direction: Option<CurveDirection>,
    pub n_curves: usize,
}

/// Monitor state at the end of a trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub trial: u32,
    pub n_samples: usize,
    /// Time between the first and the last sample
    pub duration: f64,
    pub n_curves: usize,
    pub final_angle: Option<f64>,
    pub curve_direction: Option<CurveDirection>,
    pub curve_start_angle: Option<f64>,
    pub curve_start_time: Option<f64>,
}

/// Result of replaying one trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialAnalysis {
    pub summary: TrialSummary,
    pub samples: Vec<SampleAnalysis>,
}

/// Split rows into trials, in order of first appearance
pub fn group_by_trial(rows: &[TrajectoryRow]) -> Vec<(u32, Vec<Sample>)> {
    let mut trials: Vec<(u32, Vec<Sample>)> = Vec::new();
    for row in rows {
        match trials.iter_mut().find(|(trial, _)| *trial == row.trial) {
            Some((_, samples)) => samples.push(row.sample()),
            None => trials.push((row.trial, vec![row.sample()])),
        }
    }
    trials
}

/// Reset the monitor and feed it one trial
pub fn analyze_trial(
    monitor: &mut DirectionMonitor,
    trial: u32,
    samples: &[Sample],
) -> Result<TrialAnalysis> {
    monitor.reset();

    let mut analyzed = Vec::with_capacity(samples.len());
    for s in samples {
        monitor.update(s.x, s.y, s.t)?;
        analyzed.push(SampleAnalysis {
            trial,
            time: s.t,
            x: s.x,
            y: s.y,
            angle: monitor.curr_angle(),
            curve_direction: monitor.curr_curve_direction(),
            n_curves: monitor.n_curves(),
        });
    }

    let duration = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => last.t - first.t,
        _ => 0.0,
    };

    let summary = TrialSummary {
        trial,
        n_samples: samples.len(),
        duration,
        n_curves: monitor.n_curves(),
        final_angle: monitor.curr_angle(),
        curve_direction: monitor.curr_curve_direction(),
        curve_start_angle: monitor.curr_curve_start_angle(),
        curve_start_time: monitor.curr_curve_start_sample().map(|s| s.t),
    };

    debug!(
        trial,
        n_samples = summary.n_samples,
        n_curves = summary.n_curves,
        "Trial analyzed"
    );

    Ok(TrialAnalysis {
        summary,
        samples: analyzed,
    })
}

/// Replay every trial in `rows`, or only `only_trial` when given
pub fn analyze_rows(
    monitor: &mut DirectionMonitor,
    rows: &[TrajectoryRow],
    only_trial: Option<u32>,
) -> Result<Vec<TrialAnalysis>> {
    group_by_trial(rows)
        .into_iter()
        .filter(|(trial, _)| only_trial.map_or(true, |t| t == *trial))
        .map(|(trial, samples)| analyze_trial(monitor, trial, &samples))
        .collect()
}

/// Write one CSV row per analyzed sample
pub fn write_analysis_csv<W: Write>(writer: W, analyses: &[TrialAnalysis]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for analysis in analyses {
        for row in &analysis.samples {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Sample a circular trajectory into the tracker.
///
/// Positions are taken every `1 / sample_rate_hz` seconds from 0 to
/// `duration_secs` inclusive. Returns the number of points tracked.
pub fn simulate_trial(
    generator: &CircularTrajectoryGenerator,
    tracker: &mut TrajectoryTracker,
    sample_rate_hz: u32,
    duration_secs: f64,
) -> Result<usize> {
    require_positive("simulate_trial()", "sample_rate_hz", f64::from(sample_rate_hz))?;
    require_positive("simulate_trial()", "duration_secs", duration_secs)?;

    let n_steps = (duration_secs * f64::from(sample_rate_hz)).round() as u64;
    let before = tracker.len();

    for step in 0..=n_steps {
        let t = step as f64 / f64::from(sample_rate_hz);
        let (x, y) = generator.get_xy(t)?;
        tracker.update(f64::from(x), f64::from(y), t)?;
    }

    let tracked = tracker.len() - before;
    info!(points = tracked, duration_secs, "Circular trial simulated");
    Ok(tracked)
}
