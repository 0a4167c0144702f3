//! Configuration management for the a2probe CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Gap bound used when neither the CLI flag nor the config file sets one.
/// Real payloads rarely need more than a few padding bytes between the
/// target and actor fields.
pub const DEFAULT_MAX_GAP: usize = 3;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub max_gap: Option<usize>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("a2probe");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Gap bound to use when the CLI flag is absent: the configured value,
    /// or the built-in default.
    pub fn effective_max_gap(&self) -> usize {
        self.max_gap.unwrap_or(DEFAULT_MAX_GAP)
    }
}
