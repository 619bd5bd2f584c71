//! Daemon configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{DEFAULT_INTERVAL, DEFAULT_LOOKAHEAD_DAYS, DEFAULT_LOOKBACK_DAYS};
use crate::error::{TandemError, TandemResult};
use crate::normalize::TaskSchema;
use crate::remote::StoreParams;

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

fn default_lookback_days() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_lookahead_days() -> i64 {
    DEFAULT_LOOKAHEAD_DAYS
}

/// Configuration at ~/.config/tandem/config.toml
///
/// Store-specific parameters (account, database id, etc.) live under each
/// store's table and are passed through to its provider verbatim.
#[derive(Deserialize, Clone)]
pub struct Config {
    /// Time between passes, in humantime notation ("5m", "90s").
    #[serde(default = "default_interval")]
    pub interval: String,

    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: i64,

    pub tasks: StoreConfig,
    pub events: StoreConfig,

    #[serde(default)]
    pub schema: TaskSchema,
}

#[derive(Deserialize, Clone)]
pub struct StoreConfig {
    pub provider: String,

    #[serde(flatten)]
    pub params: StoreParams,
}

impl Config {
    pub fn config_path() -> TandemResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TandemError::Config("Could not determine config directory".into()))?
            .join("tandem");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the given path, or the default location.
    pub fn load(path: Option<&Path>) -> TandemResult<Config> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            TandemError::Config(format!("Could not read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents)
            .map_err(|e| TandemError::Config(format!("Invalid {}: {}", path.display(), e)))
    }

    pub fn interval(&self) -> TandemResult<Duration> {
        humantime::parse_duration(&self.interval)
            .map_err(|e| TandemError::Config(format!("Invalid interval '{}': {}", self.interval, e)))
    }
}
