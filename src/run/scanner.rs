//! Admission-controlled orchestration of domain resolutions.
//!
//! The scan set is split into fixed-size batches. Within a batch, one task is
//! spawned per domain once it holds a permit of the global semaphore; the
//! whole batch is drained before the next one starts. Outcome counts are
//! reduced from the drained task results, never from shared counters.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, error, info, warn};
use tokio::sync::{watch, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, shutdown_gracefully, spawn_progress_logger};
use crate::config::LOGGING_INTERVAL;
use crate::error_handling::{DatabaseError, ErrorBreakdown};
use crate::fetch::DomainFetcher;
use crate::initialization::init_semaphore;
use crate::storage::{CacheSnapshot, ResultStore};

use super::summary::{Summary, Tally};
use super::task::{scan_domain_task, DomainTaskParams};

/// Picks the domains to resolve, in input order, each at most once.
///
/// Cached domains are always skipped. Failed domains are never cached, so
/// they are part of every scan set; `rescan_failed` adds them explicitly.
pub fn select_scan_set(
    domains: &[String],
    snapshot: &CacheSnapshot,
    rescan_failed: bool,
) -> Vec<String> {
    let mut seen = HashSet::with_capacity(domains.len());
    domains
        .iter()
        .filter(|domain| seen.insert(domain.as_str()))
        .filter(|domain| {
            let retry = rescan_failed && snapshot.failed.contains(domain.as_str());
            retry || !snapshot.cached.contains(domain.as_str())
        })
        .cloned()
        .collect()
}

/// Drives a [`DomainFetcher`] over a domain list.
pub struct Scanner<F: DomainFetcher> {
    fetcher: Arc<F>,
    store: ResultStore,
    semaphore: Arc<Semaphore>,
    batch_size: usize,
    progress_interval: Duration,
}

impl<F: DomainFetcher> Scanner<F> {
    /// `max_concurrency` and `batch_size` are raised to at least 1.
    pub fn new(fetcher: F, store: ResultStore, max_concurrency: usize, batch_size: usize) -> Self {
        Scanner {
            fetcher: Arc::new(fetcher),
            store,
            semaphore: init_semaphore(max_concurrency.max(1)),
            batch_size: batch_size.max(1),
            progress_interval: Duration::from_secs(LOGGING_INTERVAL),
        }
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Scans every domain of `domains` that needs (re)fetching.
    ///
    /// Per-domain failures are stored and counted; they never fail the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or a result cannot be
    /// written. The batch in flight is drained first.
    pub async fn scan(&self, domains: &[String], rescan_failed: bool) -> Result<Summary> {
        let start_time = Instant::now();

        let snapshot = self
            .store
            .snapshot()
            .await
            .context("Failed to load cached results")?;
        info!(
            "Found {} domains already cached with valid responses",
            snapshot.cached.len()
        );

        let scan_set = select_scan_set(domains, &snapshot, rescan_failed);
        let skipped = domains.len() - scan_set.len();
        if rescan_failed {
            let retried = scan_set
                .iter()
                .filter(|d| snapshot.failed.contains(d.as_str()))
                .count();
            info!(
                "Rescanning {retried} failed domains and {} new domains",
                scan_set.len() - retried
            );
        }

        if scan_set.is_empty() {
            info!("All domains already cached with valid responses!");
            return Ok(Summary::empty(skipped, start_time.elapsed().as_secs_f64()));
        }

        info!(
            "Scanning {} domains with {} concurrent connections",
            scan_set.len(),
            self.semaphore.available_permits()
        );

        let (progress_tx, progress_rx) = watch::channel(0usize);
        let cancel = CancellationToken::new();
        let logging_task = spawn_progress_logger(
            start_time,
            scan_set.len(),
            progress_rx,
            cancel.child_token(),
            self.progress_interval,
        );

        let outcome = self.run_batches(&scan_set, &progress_tx).await;
        shutdown_gracefully(cancel, Some(logging_task)).await;
        let tally = outcome?;

        log_progress(start_time, tally.total(), scan_set.len());

        let scanned: HashSet<String> = scan_set.iter().cloned().collect();
        let messages = self
            .store
            .error_messages_for(&scanned)
            .await
            .context("Failed to load error messages for summary")?;
        let error_breakdown = ErrorBreakdown::from_messages(messages.iter().map(String::as_str));

        Ok(tally.into_summary(
            scan_set.len(),
            skipped,
            start_time.elapsed().as_secs_f64(),
            error_breakdown,
        ))
    }

    async fn run_batches(
        &self,
        scan_set: &[String],
        progress: &watch::Sender<usize>,
    ) -> Result<Tally> {
        let mut tally = Tally::default();
        let batch_count = scan_set.len().div_ceil(self.batch_size);

        for (index, batch) in scan_set.chunks(self.batch_size).enumerate() {
            let (batch_tally, store_error) = self.run_batch(batch, progress).await;
            tally.merge(batch_tally);
            if let Some(e) = store_error {
                return Err(anyhow::Error::new(e).context("Failed to store scan result"));
            }
            debug!("Batch {}/{} complete", index + 1, batch_count);
        }
        Ok(tally)
    }

    async fn run_batch(
        &self,
        batch: &[String],
        progress: &watch::Sender<usize>,
    ) -> (Tally, Option<DatabaseError>) {
        let mut tally = Tally::default();
        let mut store_error = None;
        let mut tasks = FuturesUnordered::new();

        for domain in batch {
            let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping domain: {domain}");
                    tally.record_lost_task();
                    continue;
                }
            };
            let params = DomainTaskParams {
                domain: domain.clone(),
                fetcher: Arc::clone(&self.fetcher),
                store: self.store.clone(),
                permit,
                acquired_at: Instant::now(),
            };
            tasks.push(tokio::spawn(scan_domain_task(params)));
        }

        while let Some(joined) = tasks.next().await {
            match joined {
                Ok(Ok(kind)) => tally.record(kind),
                Ok(Err(e)) => {
                    error!("Failed to store scan result: {e}");
                    tally.record_lost_task();
                    store_error.get_or_insert(e);
                }
                Err(join_error) => {
                    warn!("Task panicked: {join_error:?}");
                    tally.record_lost_task();
                }
            }
            progress.send_modify(|completed| *completed += 1);
        }

        (tally, store_error)
    }
}
