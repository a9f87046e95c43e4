use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SproutError};

/// Global sprout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How often countdowns are re-evaluated, in seconds
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// What to do when the stored plant list can't be read
    #[serde(default)]
    pub on_corrupt_data: CorruptDataPolicy,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptDataPolicy {
    /// Keep a copy of the raw data and start with no plants
    #[default]
    Reset,
    /// Refuse to load
    Fail,
}

/// Slowest allowed countdown refresh, in seconds
pub const MAX_REFRESH_SECS: u64 = 3600;

fn default_refresh_secs() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            on_corrupt_data: CorruptDataPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if !(1..=MAX_REFRESH_SECS).contains(&config.refresh_secs) {
            return Err(SproutError::ConfigError(format!(
                "refresh_secs must be between 1 and {}",
                MAX_REFRESH_SECS
            )));
        }
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SproutError::ConfigError(e.to_string()))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.clamp(1, MAX_REFRESH_SECS))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "sprout")
            .ok_or_else(|| SproutError::ConfigError("Could not determine home directory".into()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }

    /// Get the database path
    ///
    /// Supports SPROUT_DB environment variable for test isolation
    pub fn db_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("SPROUT_DB") {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::data_dir()?.join("sprout.db"))
    }
}
