//! Scan resource initialization.

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::domain::load_domains;
use crate::fetch::Fetcher;
use crate::initialization::init_client;
use crate::storage::{pool_size_for, ResultStore};

use super::resources::ScanResources;

/// Initialize all resources needed for a scan.
///
/// 1. Validate configuration
/// 2. Load the domain list
/// 3. Open the result store (creating the schema if needed)
/// 4. Build the HTTP client and fetcher
///
/// # Errors
///
/// Returns an error if any initialization step fails.
pub async fn init_scan_resources(config: &Config) -> Result<ScanResources> {
    config.validate().context("Invalid configuration")?;

    let domains = load_domains(&config.file).await.with_context(|| {
        format!("Failed to read domains from {}", config.file.display())
    })?;
    info!("Loaded {} domains", domains.len());

    let store = ResultStore::open(&config.db_path, pool_size_for(config.max_concurrency))
        .await
        .with_context(|| {
            format!("Failed to initialize database {}", config.db_path.display())
        })?;

    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let fetcher = Fetcher::new(client, config.max_redirects);

    Ok(ScanResources {
        domains,
        store,
        fetcher,
    })
}
