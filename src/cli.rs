//! Command-line interface definitions.
//!
//! Kept in the library so argument parsing can be tested without spawning the
//! binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{
    Config, LogFormat, LogLevel, DB_PATH, DEFAULT_BATCH_SIZE, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, LOGGING_INTERVAL,
    MAX_REDIRECT_HOPS, REDIRECT_EXPORT_STATUSES,
};

/// Scan subdomains for live HTTP(S) endpoints and redirect chains.
#[derive(Debug, Parser)]
#[command(name = "subdomain_status", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve every domain in a file and store the outcomes
    Scan(ScanArgs),
    /// Write stored outcomes as CSV
    Export(ExportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// File with one domain per line (`-` for stdin)
    pub file: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// SQLite database path
    #[arg(long, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Maximum concurrent domain resolutions
    #[arg(long, short = 'c', default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Domains spawned per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Maximum redirect hops per domain
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_redirects: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_seconds: u64,

    /// HTTP User-Agent header
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Also rescan domains whose stored result is a failure
    #[arg(long, short = 'r')]
    pub rescan_failed: bool,

    /// Seconds between progress log lines
    #[arg(long, default_value_t = LOGGING_INTERVAL)]
    pub progress_interval: u64,
}

impl From<ScanArgs> for Config {
    fn from(args: ScanArgs) -> Self {
        Config {
            file: args.file,
            log_level: args.log_level,
            log_format: args.log_format,
            db_path: args.db_path,
            max_concurrency: args.max_concurrency,
            batch_size: args.batch_size,
            max_redirects: args.max_redirects,
            timeout_seconds: args.timeout_seconds,
            connect_timeout_seconds: args.connect_timeout_seconds,
            user_agent: args.user_agent,
            rescan_failed: args.rescan_failed,
            progress_interval_secs: args.progress_interval,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// SQLite database path
    #[arg(long, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Only rows with status 200
    #[arg(long, conflicts_with_all = ["only_3xx", "status"])]
    pub only_200: bool,

    /// Only rows with a redirect status (301, 302, 303, 307, 308)
    #[arg(long, conflicts_with = "status")]
    pub only_3xx: bool,

    /// Only rows with these status codes (repeatable)
    #[arg(long)]
    pub status: Vec<u16>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl ExportArgs {
    /// Status codes to export, `None` meaning every row.
    pub fn status_filter(&self) -> Option<Vec<u16>> {
        if self.only_200 {
            Some(vec![200])
        } else if self.only_3xx {
            Some(REDIRECT_EXPORT_STATUSES.to_vec())
        } else if !self.status.is_empty() {
            Some(self.status.clone())
        } else {
            None
        }
    }
}
