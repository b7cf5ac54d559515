//! Trajectory Pipeline Integration Tests
//!
//! Simulate -> record to CSV -> load -> replay through the direction monitor.

use tempfile::TempDir;
use trajtrack::app::config::Config;
use trajtrack::recording::replay::{analyze_rows, simulate_trial, write_analysis_csv};
use trajtrack::{CircularTrajectoryGenerator, CurveDirection, DirectionMonitor, TrajectoryTracker};

fn generator(degrees_at_t0: f64) -> CircularTrajectoryGenerator {
    CircularTrajectoryGenerator::new()
        .with_center(500, 400)
        .with_radius(1000.0)
        .unwrap()
        .with_degrees_per_sec(90.0)
        .unwrap()
        .with_degrees_at_t0(degrees_at_t0)
        .unwrap()
}

#[test]
fn test_simulate_record_and_replay() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("trajectories").join("circle.csv");

    let mut tracker = TrajectoryTracker::with_tracking(true);
    tracker.init_output_file(&path, 5, 3).unwrap();

    for (trial, start) in [(1, 0.0), (2, 180.0)] {
        tracker.reset(None);
        let n = simulate_trial(&generator(start), &mut tracker, 10, 2.0).unwrap();
        assert_eq!(n, 21);
        assert_eq!(tracker.save_to_file(trial).unwrap(), 21);
    }

    let rows = TrajectoryTracker::load_file(&path).unwrap();
    assert_eq!(rows.len(), 42);
    assert_eq!((rows[0].x, rows[0].y), (500.0, 1400.0));
    assert_eq!(rows[21].trial, 2);
    assert_eq!((rows[21].x, rows[21].y), (500.0, -600.0));

    let mut monitor = DirectionMonitor::with_units_per_mm(1.0).unwrap();
    let analyses = analyze_rows(&mut monitor, &rows, None).unwrap();
    assert_eq!(analyses.len(), 2);

    for analysis in &analyses {
        assert_eq!(analysis.summary.n_samples, 21);
        assert_eq!(analysis.summary.n_curves, 1);
        assert_eq!(analysis.summary.curve_direction, Some(CurveDirection::Clockwise));
        assert!((analysis.summary.duration - 2.0).abs() < 1e-9);
    }
}

#[test]
fn test_replay_single_trial_to_csv() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("input.csv");
    let output = temp_dir.path().join("analysis.csv");

    let mut tracker = TrajectoryTracker::with_tracking(true);
    tracker.init_output_file(&input, 5, 3).unwrap();
    for trial in 1..=3 {
        tracker.reset(None);
        simulate_trial(&generator(0.0), &mut tracker, 10, 1.0).unwrap();
        tracker.save_to_file(trial).unwrap();
    }

    let rows = TrajectoryTracker::load_file(&input).unwrap();
    let mut monitor = DirectionMonitor::with_units_per_mm(1.0).unwrap();
    let analyses = analyze_rows(&mut monitor, &rows, Some(2)).unwrap();
    assert_eq!(analyses.len(), 1);

    write_analysis_csv(std::fs::File::create(&output).unwrap(), &analyses).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["trial", "time", "x", "y", "angle", "curve_direction", "n_curves"]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 11);
    assert!(records.iter().all(|r| &r[0] == "2"));
    // No angle before the second sample, no curve before the third
    assert_eq!(&records[0][4], "");
    assert_eq!(&records[1][5], "");
    assert_eq!(&records[2][5], "clockwise");
    assert_eq!(&records[10][6], "1");
}

#[test]
fn test_config_drives_monitor_and_recording() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.direction.min_distance = 50.0;
    config.recording.time_precision = 1;
    config.save(&config_path).unwrap();

    let config = Config::load(&config_path).unwrap();
    let mut monitor = DirectionMonitor::new(config.direction.to_direction_config()).unwrap();
    assert_eq!(monitor.min_distance(), 50.0);

    let path = temp_dir.path().join("out.csv");
    let mut tracker = TrajectoryTracker::with_tracking(true);
    tracker
        .init_output_file(&path, config.recording.xy_precision, config.recording.time_precision)
        .unwrap();
    simulate_trial(&generator(0.0), &mut tracker, 10, 1.0).unwrap();
    tracker.save_to_file(1).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().nth(2), Some("1,0.1,656,1388"));

    // Samples are ~157 units apart, so every angle is still defined after the first
    let rows = TrajectoryTracker::load_file(&path).unwrap();
    let analyses = analyze_rows(&mut monitor, &rows, None).unwrap();
    assert!(analyses[0].samples[1..].iter().all(|s| s.angle.is_some()));
}
