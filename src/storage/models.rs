// storage/models.rs
// Stored row types and cache classification

use std::collections::HashSet;

use crate::config::TOO_MANY_REDIRECTS_STATUS;

/// A row of the `results` table as stored.
///
/// `redirect_chain` is kept as the raw JSON text so rows with unreadable
/// chains can still be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResult {
    pub domain: String,
    pub status_code: Option<u16>,
    pub redirect_chain: Option<String>,
    pub snippet: Option<String>,
    pub error_message: Option<String>,
    pub last_checked: Option<String>,
    pub scan_duration_ms: Option<i64>,
}

/// How a stored row affects the next scan's filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Usable outcome; skipped by every later scan.
    Meaningful,
    /// Failed outcome; re-included when rescanning failures.
    Failed,
    /// No usable outcome and no error recorded.
    Absent,
}

/// Classifies one stored row.
///
/// A row is meaningful when its status is in 200..=399 or is the 999
/// sentinel, or when it has a non-empty redirect chain. Otherwise it is
/// failed if it carries an error message.
pub fn classify_row(
    status_code: Option<i64>,
    redirect_chain: Option<&str>,
    error_message: Option<&str>,
) -> CacheState {
    let usable_status = status_code.is_some_and(|status| {
        (200..=399).contains(&status) || status == i64::from(TOO_MANY_REDIRECTS_STATUS)
    });
    let has_chain = redirect_chain
        .map(str::trim)
        .is_some_and(|chain| !chain.is_empty() && chain != "[]");

    if usable_status || has_chain {
        CacheState::Meaningful
    } else if error_message.is_some() {
        CacheState::Failed
    } else {
        CacheState::Absent
    }
}

/// Cached and failed domain sets taken from one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSnapshot {
    pub cached: HashSet<String>,
    pub failed: HashSet<String>,
}

impl CacheSnapshot {
    pub fn insert(&mut self, domain: String, state: CacheState) {
        match state {
            CacheState::Meaningful => {
                self.cached.insert(domain);
            }
            CacheState::Failed => {
                self.failed.insert(domain);
            }
            CacheState::Absent => {}
        }
    }
}
