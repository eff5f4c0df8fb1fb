//! Configuration Storage
//!
//! Persistent defaults (model, database URL, fetch concurrency) stored as
//! `config.toml` under the platform configuration directory. Environment
//! variables always win over anything stored here.

use crate::error::{Result, VerbForgeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Persistent configuration data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Database connection URL
    pub database_url: Option<String>,
    /// Chat-completion model identifier
    pub model: Option<String>,
    /// Maximum concurrent verb fetches during batch initialization
    pub fetch_concurrency: Option<usize>,
}

impl FileConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                VerbForgeError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not find configuration directory",
                ))
            })?
            .join("verb-forge");

        fs::create_dir_all(&config_dir)?;

        Ok(config_dir)
    }

    /// Get the configuration file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load configuration from disk, falling back to empty defaults
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if !config_file.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_file)?;

        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| VerbForgeError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_file = Self::config_file()?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| VerbForgeError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_file, content)?;

        Ok(())
    }
}
