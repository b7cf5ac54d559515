//! Trajtrack - Pointer movement direction and curve analysis
//!
//! Replays recorded trajectories through the direction monitor and records
//! simulated circular trajectories.

use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trajtrack::app::cli::{Cli, Commands, ConfigAction};
use trajtrack::app::config::Config;
use trajtrack::recording::replay;
use trajtrack::{AngleUnits, CircularTrajectoryGenerator, DirectionMonitor, TrajectoryTracker};

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            trial,
            output,
            json,
            min_distance,
            angle_units,
        } => {
            run_analyze(&input, trial, output, json, min_distance, angle_units, &config)?;
        }
        Commands::Simulate {
            output,
            trials,
            duration,
        } => {
            run_simulate(output, trials, duration, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_analyze(
    input: &Path,
    trial: Option<u32>,
    output: Option<PathBuf>,
    json: bool,
    min_distance: Option<f64>,
    angle_units: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Analyzing {:?}", input);

    if !input.exists() {
        anyhow::bail!("Trajectory file not found: {:?}", input);
    }

    let mut direction = config.direction.to_direction_config();
    if let Some(d) = min_distance {
        direction.min_distance = d;
    }
    if let Some(units) = angle_units {
        direction.angle_units = units.parse::<AngleUnits>()?;
    }
    let mut monitor = DirectionMonitor::new(direction)?;

    let rows = TrajectoryTracker::load_file(input)?;
    info!("Loaded {} rows", rows.len());

    let analyses = replay::analyze_rows(&mut monitor, &rows, trial)?;
    if analyses.is_empty() {
        match trial {
            Some(t) => warn!("Trial {} not found in {:?}", t, input),
            None => warn!("No samples in {:?}", input),
        }
    }

    if json {
        let summaries: Vec<_> = analyses.iter().map(|a| &a.summary).collect();
        let json_str = serde_json::to_string_pretty(&summaries)?;
        match &output {
            Some(path) => std::fs::write(path, json_str)?,
            None => println!("{}", json_str),
        }
    } else {
        match &output {
            Some(path) => replay::write_analysis_csv(std::fs::File::create(path)?, &analyses)?,
            None => replay::write_analysis_csv(std::io::stdout().lock(), &analyses)?,
        }
    }

    for a in &analyses {
        info!(
            "Trial {}: {} samples, {} curves",
            a.summary.trial, a.summary.n_samples, a.summary.n_curves
        );
    }
    if let Some(path) = &output {
        info!("Saved analysis to {:?}", path);
    }

    Ok(())
}

fn run_simulate(
    output: Option<PathBuf>,
    trials: u32,
    duration: Option<f64>,
    config: &Config,
) -> anyhow::Result<()> {
    let sim = &config.simulation;
    let duration_secs = duration.unwrap_or(sim.duration_secs);

    let generator = CircularTrajectoryGenerator::new()
        .with_center(sim.center_x, sim.center_y)
        .with_radius(sim.radius)?
        .with_degrees_per_sec(sim.degrees_per_sec)?
        .with_degrees_at_t0(sim.degrees_at_t0)?;

    let output_path = output.unwrap_or_else(|| {
        let name = chrono::Local::now()
            .format("trajectory_%Y%m%d_%H%M%S.csv")
            .to_string();
        Cli::trajectories_dir().join(name)
    });

    let mut tracker = TrajectoryTracker::with_tracking(true);
    tracker.init_output_file(
        &output_path,
        config.recording.xy_precision,
        config.recording.time_precision,
    )?;

    let mut monitor = DirectionMonitor::new(config.direction.to_direction_config())?;

    for trial in 1..=trials {
        tracker.reset(None);
        replay::simulate_trial(&generator, &mut tracker, sim.sample_rate_hz, duration_secs)?;

        let analysis = replay::analyze_trial(&mut monitor, trial, tracker.samples())?;
        tracker.save_to_file(trial)?;

        info!(
            "Trial {}: {} samples, {} curves, direction {}",
            trial,
            analysis.summary.n_samples,
            analysis.summary.n_curves,
            analysis
                .summary
                .curve_direction
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }

    println!("Saved {} trial(s) to {:?}", trials, output_path);
    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::trajectories_dir())?;
    println!("\nCreated directories:");
    println!("  Trajectories: {:?}", Cli::trajectories_dir());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            match find_toml_value(&toml_str, &key) {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'trajtrack init' first.");
            }

            let mut toml_content = std::fs::read_to_string(&config_path)?;
            if !set_toml_value(&mut toml_content, &key, &value) {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }

            // Reject values that would make the config unloadable
            let updated: Config = toml::from_str(&toml_content)?;
            updated.validate()?;

            std::fs::write(&config_path, &toml_content)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            Config::default().save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let (section_name, leaf_key) = split_key(key)?;
    let mut in_section = section_name.is_empty();

    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_section = &trimmed[1..trimmed.len() - 1] == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                if trimmed[..eq_pos].trim() == leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}

/// Simple TOML value setter by dotted key
fn set_toml_value(toml_str: &mut String, key: &str, value: &str) -> bool {
    let Some((section_name, leaf_key)) = split_key(key) else {
        return false;
    };
    let mut in_section = section_name.is_empty();
    let mut found = false;

    let mut new_lines = Vec::new();
    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_section = &trimmed[1..trimmed.len() - 1] == section_name;
        }

        if in_section && !found {
            if let Some(eq_pos) = trimmed.find('=') {
                if trimmed[..eq_pos].trim() == leaf_key {
                    new_lines.push(format!("{} = {}", leaf_key, value));
                    found = true;
                    continue;
                }
            }
        }

        new_lines.push(line.to_string());
    }

    if found {
        *toml_str = new_lines.join("\n");
        toml_str.push('\n');
    }

    found
}

/// "section.key" -> ("section", "key"); a bare key has an empty section
fn split_key(key: &str) -> Option<(&str, &str)> {
    match key.rsplit_once('.') {
        Some((section, leaf)) if !leaf.is_empty() => Some((section, leaf)),
        Some(_) => None,
        None if key.is_empty() => None,
        None => Some(("", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_toml_value() {
        let toml_str = Config::default().to_toml().unwrap();
        assert_eq!(find_toml_value(&toml_str, "direction.angle_units"), Some("\"degrees\""));
        assert_eq!(find_toml_value(&toml_str, "simulation.sample_rate_hz"), Some("100"));
        assert_eq!(find_toml_value(&toml_str, "direction.missing"), None);
        assert_eq!(find_toml_value(&toml_str, "units_per_mm"), None);
    }

    #[test]
    fn test_set_toml_value() {
        let mut toml_str = Config::default().to_toml().unwrap();
        assert!(set_toml_value(&mut toml_str, "direction.min_distance", "3.5"));
        assert_eq!(find_toml_value(&toml_str, "direction.min_distance"), Some("3.5"));

        let config: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.direction.min_distance, 3.5);

        assert!(!set_toml_value(&mut toml_str, "recording.missing", "1"));
        assert!(!set_toml_value(&mut toml_str, "", "1"));
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("direction.zero_angle"), Some(("direction", "zero_angle")));
        assert_eq!(split_key("top"), Some(("", "top")));
        assert_eq!(split_key("direction."), None);
        assert_eq!(split_key(""), None);
    }
}
