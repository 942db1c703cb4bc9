//! Application settings stored as TOML in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ParticlesConfig, RevealDefaults};

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Top-level application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between animation ticks.
    pub tick_rate_ms: u64,
    /// particles.js document to load instead of the built-in field.
    pub particles: Option<PathBuf>,
    /// Seed for particle placement; random when absent.
    pub seed: Option<u64>,
    /// Log filter level written to the log file.
    pub log_level: String,
    pub reveal: RevealDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16,
            particles: None,
            seed: None,
            log_level: "info".to_string(),
            reveal: RevealDefaults::default(),
        }
    }
}

impl Settings {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "drift")
    }

    /// Default location of `config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Location of the log file.
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("drift.log"))
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if !(1..=1000).contains(&self.tick_rate_ms) {
            return Err(ConfigError::OutOfRange {
                field: "tick_rate_ms",
                value: self.tick_rate_ms as f32,
                min: 1.0,
                max: 1000.0,
            });
        }
        let level = self.log_level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log_level",
                value: self.log_level,
            });
        }
        self.log_level = level;
        self.reveal = self.reveal.validate()?;
        Ok(self)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// The configured particles document, or the built-in one.
    pub fn particles_config(&self) -> Result<ParticlesConfig, ConfigError> {
        match &self.particles {
            Some(path) => ParticlesConfig::from_path(path),
            None => Ok(ParticlesConfig::default()),
        }
    }
}
