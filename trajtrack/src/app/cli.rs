//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trajtrack - Pointer movement direction and curve analysis
#[derive(Parser, Debug)]
#[command(name = "trajtrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the direction monitor over a trajectory file
    Analyze {
        /// Input trajectory file (trial,time,x,y)
        #[arg(short, long)]
        input: PathBuf,

        /// Only analyze this trial
        #[arg(short, long)]
        trial: Option<u32>,

        /// Write per-sample results to this CSV file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print per-trial summaries as JSON
        #[arg(long)]
        json: bool,

        /// Override the configured minimal distance (mm)
        #[arg(long)]
        min_distance: Option<f64>,

        /// Override the configured angle units ("degrees" or "radians")
        #[arg(long)]
        angle_units: Option<String>,
    },

    /// Record simulated circular trajectories to a file
    Simulate {
        /// Output trajectory file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of trials to record
        #[arg(short = 'n', long, default_value = "1")]
        trials: u32,

        /// Trial duration in seconds (overrides config)
        #[arg(short, long)]
        duration: Option<f64>,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "direction.min_distance", "simulation.radius")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the trajectory output directory
    pub fn trajectories_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".trajtrack").join("trajectories"))
            .unwrap_or_else(|| PathBuf::from("trajectories"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_trajectories_dir() {
        let dir = Cli::trajectories_dir();
        assert!(dir.to_string_lossy().contains("trajectories"));
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_cli_parse_analyze_command_with_defaults() {
        let args = vec!["trajtrack", "analyze", "--input", "/path/to/trajectory.csv"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Analyze { input, trial, output, json, min_distance, angle_units } => {
                assert_eq!(input, PathBuf::from("/path/to/trajectory.csv"));
                assert!(trial.is_none());
                assert!(output.is_none());
                assert!(!json);
                assert!(min_distance.is_none());
                assert!(angle_units.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parse_analyze_command_with_all_options() {
        let args = vec![
            "trajtrack",
            "analyze",
            "-i", "in.csv",
            "-t", "3",
            "-o", "out.csv",
            "--json",
            "--min-distance", "2.5",
            "--angle-units", "radians",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Analyze { input, trial, output, json, min_distance, angle_units } => {
                assert_eq!(input, PathBuf::from("in.csv"));
                assert_eq!(trial, Some(3));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert!(json);
                assert_eq!(min_distance, Some(2.5));
                assert_eq!(angle_units.as_deref(), Some("radians"));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parse_simulate_command_defaults() {
        let args = vec!["trajtrack", "simulate"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Simulate { output, trials, duration } => {
                assert!(output.is_none());
                assert_eq!(trials, 1);
                assert!(duration.is_none());
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_parse_simulate_command_with_options() {
        let args = vec![
            "trajtrack",
            "simulate",
            "--output", "circle.csv",
            "-n", "4",
            "-d", "2.5",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Simulate { output, trials, duration } => {
                assert_eq!(output, Some(PathBuf::from("circle.csv")));
                assert_eq!(trials, 4);
                assert_eq!(duration, Some(2.5));
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_parse_init_command() {
        let cli = Cli::try_parse_from(vec!["trajtrack", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }

        let cli = Cli::try_parse_from(vec!["trajtrack", "init"]).unwrap();
        match cli.command {
            Commands::Init { force } => assert!(!force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let args = vec![
            "trajtrack",
            "-v",
            "-c", "/custom/config.toml",
            "simulate",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_global_flag_after_subcommand() {
        let args = vec!["trajtrack", "analyze", "-i", "in.csv", "--verbose"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_invalid_command_fails() {
        let result = Cli::try_parse_from(vec!["trajtrack", "invalid-command"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_missing_required_argument_fails() {
        let result = Cli::try_parse_from(vec!["trajtrack", "analyze"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_non_numeric_trial_fails() {
        let result = Cli::try_parse_from(vec!["trajtrack", "analyze", "-i", "in.csv", "-t", "first"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();

        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert!(subcommands.contains(&"analyze"));
        assert!(subcommands.contains(&"simulate"));
        assert!(subcommands.contains(&"init"));
        assert!(subcommands.contains(&"config"));
    }

    #[test]
    fn test_cli_parse_config_show() {
        let cli = Cli::try_parse_from(vec!["trajtrack", "config", "show"]).unwrap();
        match cli.command {
            Commands::Config { action: ConfigAction::Show } => {}
            _ => panic!("Expected Config Show"),
        }
    }

    #[test]
    fn test_cli_parse_config_set() {
        let args = vec!["trajtrack", "config", "set", "direction.min_distance", "3.0"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Set { key, value } } => {
                assert_eq!(key, "direction.min_distance");
                assert_eq!(value, "3.0");
            }
            _ => panic!("Expected Config Set"),
        }
    }

    #[test]
    fn test_cli_parse_config_get() {
        let args = vec!["trajtrack", "config", "get", "direction.angle_units"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Get { key } } => {
                assert_eq!(key, "direction.angle_units");
            }
            _ => panic!("Expected Config Get"),
        }
    }

    #[test]
    fn test_cli_parse_config_reset() {
        let cli = Cli::try_parse_from(vec!["trajtrack", "config", "reset", "--force"]).unwrap();
        match cli.command {
            Commands::Config { action: ConfigAction::Reset { force } } => assert!(force),
            _ => panic!("Expected Config Reset"),
        }

        let cli = Cli::try_parse_from(vec!["trajtrack", "config", "reset"]).unwrap();
        match cli.command {
            Commands::Config { action: ConfigAction::Reset { force } } => assert!(!force),
            _ => panic!("Expected Config Reset"),
        }
    }
}
