//! Configuration Management

use crate::movement::angle::AngleUnits;
use crate::movement::direction_monitor::DirectionConfig;
use crate::recording::trajectory_tracker::{DEFAULT_TIME_PRECISION, DEFAULT_XY_PRECISION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Direction monitor settings
    #[serde(default)]
    pub direction: DirectionSettings,
    /// Trajectory file settings
    #[serde(default)]
    pub recording: RecordingSettings,
    /// Circular trajectory simulation settings
    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Direction monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionSettings {
    /// Spatial units (e.g. pixels) per millimeter
    pub units_per_mm: f64,
    /// Minimal distance (mm) between samples for computing a direction
    pub min_distance: f64,
    /// "degrees" or "radians"
    pub angle_units: AngleUnits,
    /// Angle that counts as zero (0 = up)
    pub zero_angle: f64,
    /// Optional bound on samples kept per trial; needs `min_distance = 0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
}

/// Trajectory file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    /// Decimal places for x/y
    pub xy_precision: usize,
    /// Decimal places for time
    pub time_precision: usize,
}

/// Circular trajectory simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: f64,
    pub degrees_per_sec: f64,
    pub degrees_at_t0: f64,
    /// Samples per second
    pub sample_rate_hz: u32,
    /// Trial duration in seconds
    pub duration_secs: f64,
}

impl Default for DirectionSettings {
    fn default() -> Self {
        Self {
            units_per_mm: 1.0,
            min_distance: 0.0,
            angle_units: AngleUnits::Degrees,
            zero_angle: 0.0,
            max_samples: None,
        }
    }
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            xy_precision: DEFAULT_XY_PRECISION,
            time_precision: DEFAULT_TIME_PRECISION,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            center_x: 0,
            center_y: 0,
            radius: 100.0,
            degrees_per_sec: 90.0,
            degrees_at_t0: 0.0,
            sample_rate_hz: 100,
            duration_secs: 4.0,
        }
    }
}

impl DirectionSettings {
    /// Options for constructing a [`DirectionMonitor`](crate::DirectionMonitor)
    pub fn to_direction_config(&self) -> DirectionConfig {
        DirectionConfig {
            units_per_mm: self.units_per_mm,
            min_distance: self.min_distance,
            angle_units: self.angle_units,
            zero_angle: self.zero_angle,
            max_samples: self.max_samples,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(self.direction.units_per_mm.is_finite() && self.direction.units_per_mm > 0.0) {
            return Err(crate::Error::Config(format!(
                "units_per_mm must be > 0, got {}", self.direction.units_per_mm
            )));
        }
        if !(self.direction.min_distance.is_finite() && self.direction.min_distance >= 0.0) {
            return Err(crate::Error::Config(format!(
                "min_distance must be >= 0, got {}", self.direction.min_distance
            )));
        }
        if !self.direction.zero_angle.is_finite() {
            return Err(crate::Error::Config(format!(
                "zero_angle must be a finite number, got {}", self.direction.zero_angle
            )));
        }
        if let Some(max) = self.direction.max_samples {
            if max < 2 {
                return Err(crate::Error::Config(format!("max_samples must be >= 2, got {}", max)));
            }
            if self.direction.min_distance > 0.0 {
                return Err(crate::Error::Config(format!(
                    "max_samples cannot be combined with min_distance > 0, got {}",
                    self.direction.min_distance
                )));
            }
        }
        if self.recording.xy_precision > 15 || self.recording.time_precision > 15 {
            return Err(crate::Error::Config(format!(
                "precision must be in [0, 15], got xy={} time={}",
                self.recording.xy_precision, self.recording.time_precision
            )));
        }
        if !(self.simulation.radius.is_finite() && self.simulation.radius > 0.0) {
            return Err(crate::Error::Config(format!(
                "radius must be > 0, got {}", self.simulation.radius
            )));
        }
        if !(self.simulation.degrees_per_sec.is_finite() && self.simulation.degrees_per_sec > 0.0) {
            return Err(crate::Error::Config(format!(
                "degrees_per_sec must be > 0, got {}", self.simulation.degrees_per_sec
            )));
        }
        if !self.simulation.degrees_at_t0.is_finite() {
            return Err(crate::Error::Config(format!(
                "degrees_at_t0 must be a finite number, got {}", self.simulation.degrees_at_t0
            )));
        }
        if self.simulation.sample_rate_hz == 0 {
            return Err(crate::Error::Config("sample_rate_hz must be > 0".to_string()));
        }
        if !(self.simulation.duration_secs.is_finite() && self.simulation.duration_secs > 0.0) {
            return Err(crate::Error::Config(format!(
                "duration_secs must be > 0, got {}", self.simulation.duration_secs
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".trajtrack").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
