//! Game configuration.
//!
//! Defaults give the classic 10x10 board with one explode cycle per second.
//! A JSON file named by `EXPLODING_ATOMS_CONFIG` overrides any subset of the
//! fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "EXPLODING_ATOMS_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// Seconds between explode cycles
    pub explode_interval_secs: f32,
    /// On-screen cell size in pixels at zoom 1.0
    pub cell_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            explode_interval_secs: 1.0,
            cell_size: 48.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or use defaults when unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("loading config from {}", Path::new(&path).display());
                Self::from_path(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "board must have at least one cell, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.explode_interval_secs.is_finite() && self.explode_interval_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "explode_interval_secs must be positive, got {}",
                self.explode_interval_secs
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size >= 4.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be at least 4 pixels, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (10, 10));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "width": 6 }"#).unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, 10);
        assert!((config.explode_interval_secs - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = GameConfig::from_json(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_interval_rejected() {
        let err = GameConfig::from_json(r#"{ "explode_interval_secs": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::from_path("/nonexistent/exploding-atoms.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
