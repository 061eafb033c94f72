//! Log subscriber setup
//!
//! The terminal belongs to the UI, so log lines only ever go to a file.
//! Without [`AppConfig::log_file`] no subscriber is installed and every
//! `tracing` macro in the crate is a no-op.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};

/// Errors raised while installing the log subscriber
#[derive(Debug, Error)]
pub enum LogInitError {
    /// Log file could not be opened for appending
    #[error("cannot open log file {path}: {source}")]
    Open {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Filter directive did not parse
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        /// Directive as configured
        filter: String,
        /// Underlying error
        #[source]
        source: ParseError,
    },

    /// A global subscriber was already set
    #[error("log subscriber already installed: {0}")]
    Install(String),
}

/// Parses a filter directive such as `info` or `calcpad::core=debug`
pub fn build_filter(directive: &str) -> Result<EnvFilter, LogInitError> {
    EnvFilter::try_new(directive).map_err(|source| LogInitError::Filter {
        filter: directive.to_string(),
        source,
    })
}

fn open_log_file(path: &Path) -> Result<File, LogInitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogInitError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Installs the global subscriber described by `config`.
///
/// Returns `Ok(false)` when logging is off.
pub fn init(config: &AppConfig) -> Result<bool, LogInitError> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };

    let filter = build_filter(&config.log_filter)?;
    let writer = Mutex::new(open_log_file(path)?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let installed = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| LogInitError::Install(e.to_string()))?;

    tracing::debug!(path = %path.display(), format = ?config.log_format, "logging initialized");
    Ok(true)
}
