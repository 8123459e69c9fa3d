//! subdomain_status library: concurrent subdomain redirect resolution
//!
//! This library resolves large lists of hostnames to their terminal HTTP
//! outcome, recording every redirect hop and a snippet of the final page, and
//! caches the outcomes in SQLite so later scans only fetch what is missing.
//!
//! # Example
//!
//! ```no_run
//! use subdomain_status::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("subdomains.txt"),
//!     max_concurrency: 50,
//!     ..Default::default()
//! };
//!
//! let summary = run_scan(config).await?;
//! println!(
//!     "Scanned {} domains: {} new 200s, {} failed",
//!     summary.total_scanned, summary.new_200, summary.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod models;
mod run;
pub mod storage;
mod utils;

pub use app::{log_status_breakdown, log_summary};
pub use config::{Config, ConfigError, LogFormat, LogLevel};
pub use domain::load_domains;
pub use error_handling::{ErrorBreakdown, ErrorCategory};
pub use export::export_csv;
pub use fetch::{DomainFetcher, Fetcher};
pub use models::{Hop, OutcomeKind, ScanResult};
pub use run::{run_scan, select_scan_set, Scanner, Summary};
pub use storage::{CacheState, ResultStore, StoredResult};
