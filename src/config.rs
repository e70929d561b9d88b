//! User configuration loaded from `config.toml` in the data directory.
//!
//! Every field is optional in the file:
//!
//! ```toml
//! user = "local"
//! work_minutes = 25
//! break_minutes = 5
//! sunday_policy = "next-week"   # or "same-day"
//! notifications = true
//! validate_images = true
//! image_timeout_secs = 5
//! tick_ms = 250
//! ```

use crate::domain::SundayPolicy;
use crate::timer::Intervals;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest work or break interval accepted, one day
const MAX_INTERVAL_MINUTES: u32 = 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Owner id written to every task record
    pub user: String,
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub sunday_policy: SundayPolicy,
    /// Desktop notifications when an interval ends
    pub notifications: bool,
    /// Check image URLs over HTTP before keeping them
    pub validate_images: bool,
    pub image_timeout_secs: u64,
    /// UI refresh and input poll interval
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: "local".to_string(),
            work_minutes: 25,
            break_minutes: 5,
            sunday_policy: SundayPolicy::NextWeek,
            notifications: true,
            validate_images: true,
            image_timeout_secs: 5,
            tick_ms: crate::ticker::DEFAULT_TICK_MS,
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.user.trim().is_empty() {
            return Err(ConfigError::Invalid("user must not be empty".to_string()));
        }
        if self.work_minutes == 0 || self.break_minutes == 0 {
            return Err(ConfigError::Invalid(
                "work_minutes and break_minutes must be at least 1".to_string(),
            ));
        }
        if self.work_minutes > MAX_INTERVAL_MINUTES || self.break_minutes > MAX_INTERVAL_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "work_minutes and break_minutes must be at most {}",
                MAX_INTERVAL_MINUTES
            )));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn intervals(&self) -> Intervals {
        Intervals {
            work_secs: self.work_minutes.saturating_mul(60),
            break_secs: self.break_minutes.saturating_mul(60),
        }
    }
}
