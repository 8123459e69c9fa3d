//! Progress logging utilities.

use std::time::{Duration, Instant};

use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::LOGGING_INTERVAL;

/// Logs progress information about domain resolution.
///
/// # Arguments
///
/// * `start_time` - The start time of the scan
/// * `completed` - Domains finished so far
/// * `total` - Size of the scan set
pub fn log_progress(start_time: Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    let percent = if total > 0 {
        completed as f64 * 100.0 / total as f64
    } else {
        100.0
    };
    info!(
        "Processed {completed}/{total} domains ({percent:.1}%) in {elapsed_secs:.2} seconds (~{rate:.2} domains/sec)"
    );
}

/// Spawns a task that logs progress every `interval` until `cancel` fires.
///
/// The completed count is read from `progress`, which only the orchestrator
/// writes.
pub fn spawn_progress_logger(
    start_time: Instant,
    total: usize,
    progress: watch::Receiver<usize>,
    cancel: CancellationToken,
    interval: Duration,
) -> JoinHandle<()> {
    let period = if interval.is_zero() {
        Duration::from_secs(LOGGING_INTERVAL)
    } else {
        interval
    };
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    log_progress(start_time, *progress.borrow(), total);
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}
