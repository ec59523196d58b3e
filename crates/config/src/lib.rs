#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for haul
//!
//! Configuration is merged from, in order of precedence (lowest first):
//! - Default values (hard-coded)
//! - Configuration file (`<config dir>/haul/config.toml`)
//! - Environment variables (`HAUL_*`)

mod constants;

pub use constants::*;

use haul_errors::{ConfigError, Error};
use haul_hash::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadSettings,

    #[serde(default)]
    pub network: NetworkSettings,
}

/// Per-transfer behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadSettings {
    /// Minimum time between two progress samples
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
    /// Digest used when a job carries an expected hash
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
    /// Fail transfers whose response status is not 2xx
    #[serde(default = "default_require_success_status")]
    pub require_success_status: bool,
    /// Number of samples in the speed window
    #[serde(default = "default_speed_window")]
    pub speed_window: usize,
}

/// HTTP client settings
///
/// There are deliberately no timeout settings: a stalled transfer is ended
/// by the caller through `abort()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSettings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_pool_idle_timeout_secs")]
    pub pool_idle_timeout_secs: u64,
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            hash_algorithm: HashAlgorithm::default(),
            require_success_status: true,
            speed_window: DEFAULT_SPEED_WINDOW,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            pool_idle_timeout_secs: DEFAULT_POOL_IDLE_TIMEOUT_SECS,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }
}

impl DownloadSettings {
    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

impl NetworkSettings {
    #[must_use]
    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}

// Default value functions for serde
fn default_progress_interval_ms() -> u64 {
    DEFAULT_PROGRESS_INTERVAL_MS
}

fn default_require_success_status() -> bool {
    true
}

fn default_speed_window() -> usize {
    DEFAULT_SPEED_WINDOW
}

fn default_user_agent() -> String {
    format!("haul/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

fn default_pool_idle_timeout_secs() -> u64 {
    DEFAULT_POOL_IDLE_TIMEOUT_SECS
}

fn default_pool_max_idle_per_host() -> usize {
    DEFAULT_POOL_MAX_IDLE_PER_HOST
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("haul").join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML for this schema.
    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading configuration");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(interval) = std::env::var(ENV_PROGRESS_INTERVAL_MS) {
            self.download.progress_interval_ms =
                interval.parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_PROGRESS_INTERVAL_MS.to_string(),
                    value: interval,
                })?;
        }

        if let Ok(algorithm) = std::env::var(ENV_HASH_ALGORITHM) {
            self.download.hash_algorithm =
                algorithm.parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_HASH_ALGORITHM.to_string(),
                    value: algorithm,
                })?;
        }

        if let Ok(flag) = std::env::var(ENV_REQUIRE_SUCCESS_STATUS) {
            self.download.require_success_status = match flag.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_REQUIRE_SUCCESS_STATUS.to_string(),
                        value: flag,
                    }
                    .into())
                }
            };
        }

        if let Ok(user_agent) = std::env::var(ENV_USER_AGENT) {
            if user_agent.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: ENV_USER_AGENT.to_string(),
                    value: user_agent,
                }
                .into());
            }
            self.network.user_agent = user_agent;
        }

        if let Ok(redirects) = std::env::var(ENV_MAX_REDIRECTS) {
            self.network.max_redirects =
                redirects.parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_MAX_REDIRECTS.to_string(),
                    value: redirects,
                })?;
        }

        Ok(())
    }
}
