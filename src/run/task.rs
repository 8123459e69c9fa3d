//! Per-domain task processing.
//!
//! One task resolves one domain and writes its result while holding a
//! concurrency permit.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OwnedSemaphorePermit;

use crate::error_handling::DatabaseError;
use crate::fetch::DomainFetcher;
use crate::models::OutcomeKind;
use crate::storage::ResultStore;
use crate::utils::elapsed_ms;

/// Everything a domain task owns.
pub struct DomainTaskParams<F> {
    pub domain: String,
    pub fetcher: Arc<F>,
    pub store: ResultStore,
    /// Held until the task returns, store write included
    pub permit: OwnedSemaphorePermit,
    /// When the permit was granted
    pub acquired_at: Instant,
}

/// Resolves one domain and stores the result.
///
/// The stored duration runs from permit acquisition to the end of the
/// resolution.
///
/// # Errors
///
/// Returns the store error if the result could not be written.
pub async fn scan_domain_task<F: DomainFetcher>(
    params: DomainTaskParams<F>,
) -> Result<OutcomeKind, DatabaseError> {
    let DomainTaskParams {
        domain,
        fetcher,
        store,
        permit: _permit,
        acquired_at,
    } = params;

    let mut result = fetcher.resolve(&domain).await;
    result.scan_duration_ms = elapsed_ms(acquired_at);
    let kind = result.outcome_kind();

    store.upsert(&result).await?;
    Ok(kind)
}
