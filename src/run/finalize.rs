//! Scan finalization and cleanup.

use log::warn;

use crate::storage::ResultStore;

/// Checkpoints the WAL file and closes the pool.
///
/// Failures here are logged, not returned: every result is already committed.
pub async fn finalize_scan(store: ResultStore) {
    if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(store.pool().as_ref())
        .await
    {
        warn!("Failed to checkpoint WAL file (this is non-critical): {e}");
    }
    store.pool().close().await;
}
