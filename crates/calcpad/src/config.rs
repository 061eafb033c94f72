//! Application configuration
//!
//! Defaults, then an optional JSON file named by `CALCPAD_CONFIG`, then the
//! `CALCPAD_LOG*` environment variables. There are no command-line flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names the JSON config file
pub const CONFIG_ENV: &str = "CALCPAD_CONFIG";
/// Overrides [`AppConfig::log_filter`]
pub const LOG_FILTER_ENV: &str = "CALCPAD_LOG";
/// Overrides [`AppConfig::log_file`]
pub const LOG_FILE_ENV: &str = "CALCPAD_LOG_FILE";
/// Overrides [`AppConfig::log_format`]
pub const LOG_FORMAT_ENV: &str = "CALCPAD_LOG_FORMAT";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`AppConfig`]
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Unknown log format name
    #[error("unknown log format '{0}' (expected 'text' or 'json')")]
    LogFormat(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::LogFormat(s.to_string())),
        }
    }
}

/// Calculator application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing` filter directive, e.g. `info` or `calcpad=debug`
    pub log_filter: String,
    /// File receiving log output; logging is off when unset
    pub log_file: Option<PathBuf>,
    /// Log line format
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the process environment
    pub fn load() -> ConfigResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` to read environment variables
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let base = match lookup(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load_from(Path::new(&path))?,
            _ => Self::default(),
        };
        base.with_env(lookup)
    }

    /// Loads a JSON config file; missing fields take their defaults
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies the `CALCPAD_LOG*` overrides
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|v| !v.is_empty()) {
            self.log_filter = filter;
        }
        if let Some(file) = lookup(LOG_FILE_ENV).filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(file));
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV).filter(|v| !v.is_empty()) {
            self.log_format = format.parse()?;
        }
        Ok(self)
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set the log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Set the log format
    #[must_use]
    pub const fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}
