//! Configuration types.
//!
//! This module defines the enums and structs used to configure a scan. The
//! CLI in `main.rs` maps its arguments onto these types.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use thiserror::Error;

use crate::config::constants::{
    DB_PATH, DEFAULT_BATCH_SIZE, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, LOGGING_INTERVAL, MAX_REDIRECT_HOPS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Reasons a [`Config`] is rejected before any resource is opened.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("batch_size must be at least 1")]
    ZeroBatchSize,
    #[error("max_redirects must be at least 1")]
    ZeroRedirects,
    #[error("timeouts must be at least 1 second")]
    ZeroTimeout,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use subdomain_status::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("domains.txt"),
///     max_concurrency: 50,
///     rescan_failed: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read domains from (`-` for stdin)
    pub file: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Maximum concurrent domain resolutions
    pub max_concurrency: usize,

    /// Domains spawned per batch
    pub batch_size: usize,

    /// Maximum hops recorded before giving up with status 999
    pub max_redirects: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    pub connect_timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Re-include domains whose stored result is a failure
    pub rescan_failed: bool,

    /// Seconds between progress log lines
    pub progress_interval_secs: u64,
}

impl Config {
    /// Checks the numeric limits a scan depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.max_redirects == 0 {
            return Err(ConfigError::ZeroRedirects);
        }
        if self.timeout_seconds == 0 || self.connect_timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            batch_size: DEFAULT_BATCH_SIZE,
            max_redirects: MAX_REDIRECT_HOPS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rescan_failed: false,
            progress_interval_secs: LOGGING_INTERVAL,
        }
    }
}
