//! Runtime configuration
//!
//! Settings come from an optional TOML file. A missing file means defaults; a file
//! that exists but does not parse is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default window for upcoming-task listings, in hours
    pub upcoming_hours: i64,
    /// Default reminder window, in minutes
    pub reminder_minutes: i64,
    /// chrono format for deadlines, start and end times typed by users
    pub datetime_format: String,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upcoming_hours: 24,
            reminder_minutes: 60,
            datetime_format: "%Y-%m-%d %H:%M".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text; absent keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.upcoming_hours < 0 {
            anyhow::bail!("upcoming_hours must not be negative");
        }
        Ok(config)
    }
}
