//! Scan resources.

use crate::fetch::Fetcher;
use crate::storage::ResultStore;

/// Resources initialized for a scan operation.
pub struct ScanResources {
    /// Cleaned, deduplicated input domains in input order
    pub domains: Vec<String>,
    pub store: ResultStore,
    pub fetcher: Fetcher,
}
