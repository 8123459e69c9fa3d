//! Scan execution.
//!
//! [`run_scan`] wires the pieces together: resources are initialized, the
//! [`Scanner`] runs the batches, and the store is finalized.

mod finalize;
mod init;
mod resources;
mod scanner;
mod summary;
mod task;

use std::time::Duration;

use anyhow::Result;

use crate::config::Config;

pub use finalize::finalize_scan;
pub use init::init_scan_resources;
pub use resources::ScanResources;
pub use scanner::{select_scan_set, Scanner};
pub use summary::Summary;

/// Runs a full scan as configured and returns its summary.
///
/// # Errors
///
/// Returns an error if initialization fails or a result cannot be stored.
pub async fn run_scan(config: Config) -> Result<Summary> {
    let ScanResources {
        domains,
        store,
        fetcher,
    } = init_scan_resources(&config).await?;

    let scanner = Scanner::new(
        fetcher,
        store.clone(),
        config.max_concurrency,
        config.batch_size,
    )
    .with_progress_interval(Duration::from_secs(config.progress_interval_secs));

    let outcome = scanner.scan(&domains, config.rescan_failed).await;
    finalize_scan(store).await;
    outcome
}
