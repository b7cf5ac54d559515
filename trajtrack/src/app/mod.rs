//! Application Layer
//!
//! Command-line front end and TOML configuration.

pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::Config;
