//! Tunables of the fleet controller.
//!
//! Everything here has a sensible default so the binary runs without any
//! configuration file; a YAML file may override any subset of the fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV_VAR: &str = "ORE_FLEET_CONFIG";

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FleetConfig {
    /// Number of robot slots, one output line each per turn.
    #[serde(default = "default_fleet_size")]
    pub fleet_size: usize,
    /// Manhattan radius revealed by a buried radar.
    #[serde(default = "default_reveal_radius")]
    pub reveal_radius: usize,
    /// A radar is only requested while at least this fraction of the grid is unknown.
    #[serde(default = "default_unknown_threshold")]
    pub unknown_threshold: f64,
    /// Turns the judge blocks radar requests after one is granted.
    #[serde(default = "default_cooldown")]
    pub radar_cooldown: u32,
    /// Turns the judge blocks trap requests after one is granted. Reserved for
    /// trap requests, which are not planned yet.
    #[serde(default = "default_cooldown")]
    pub trap_cooldown: u32,
    /// Soft wall-clock budget of a turn, in milliseconds. Only reported, never enforced.
    #[serde(default = "default_turn_budget_ms")]
    pub turn_budget_ms: u64,
    /// Render the belief grid on stderr every turn.
    #[serde(default)]
    pub debug_map: bool,
}

fn default_fleet_size() -> usize {
    5
}

fn default_reveal_radius() -> usize {
    4
}

fn default_unknown_threshold() -> f64 {
    0.40
}

fn default_cooldown() -> u32 {
    5
}

fn default_turn_budget_ms() -> u64 {
    50
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            fleet_size: default_fleet_size(),
            reveal_radius: default_reveal_radius(),
            unknown_threshold: default_unknown_threshold(),
            radar_cooldown: default_cooldown(),
            trap_cooldown: default_cooldown(),
            turn_budget_ms: default_turn_budget_ms(),
            debug_map: false,
        }
    }
}

impl FleetConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: FleetConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fleet_size == 0 {
            return Err(ConfigError::Invalid("fleet_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.unknown_threshold) {
            return Err(ConfigError::Invalid(format!(
                "unknown_threshold must be within [0, 1], got {}",
                self.unknown_threshold
            )));
        }
        Ok(())
    }
}
