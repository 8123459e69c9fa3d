//! Scan data model.
//!
//! A [`ScanResult`] is produced once per domain resolution attempt and stored
//! as a single row keyed by domain. Its redirect chain is an ordered list of
//! [`Hop`]s, serialized to JSON for storage.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TOO_MANY_REDIRECTS_STATUS;

/// Response headers recorded for a hop, keyed by lower-case header name.
pub type HopHeaders = BTreeMap<String, String>;

/// One HTTP exchange within a domain's redirect resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub url: String,
    pub status_code: u16,
    #[serde(default)]
    pub headers: HopHeaders,
}

/// Outcome of one resolution attempt for a domain.
///
/// `status_code` is `None` for hard failures, an HTTP status for terminal
/// responses, or [`TOO_MANY_REDIRECTS_STATUS`] when the hop limit ran out.
/// `error_message` is set whenever no usable terminal status was reached,
/// which includes the 999 sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub domain: String,
    pub status_code: Option<u16>,
    pub redirect_chain: Vec<Hop>,
    pub snippet: String,
    pub error_message: Option<String>,
    pub last_checked: DateTime<Utc>,
    pub scan_duration_ms: i64,
}

/// Coarse classification of a fresh result, used for per-scan counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// Terminal 200 response
    Ok,
    /// Terminal 3xx response (a redirect without a Location header)
    Redirect,
    /// Redirect limit exhausted
    TooManyRedirects,
    /// Any other terminal HTTP status (1xx, 2xx other than 200, 4xx, 5xx)
    OtherStatus,
    /// No terminal status was reached
    Failed,
}

impl ScanResult {
    /// Builds a hard-failure result: no status, empty chain.
    pub fn failure(domain: &str, error_message: String, scan_duration_ms: i64) -> Self {
        ScanResult {
            domain: domain.to_string(),
            status_code: None,
            redirect_chain: Vec::new(),
            snippet: String::new(),
            error_message: Some(error_message),
            last_checked: Utc::now(),
            scan_duration_ms,
        }
    }

    pub fn outcome_kind(&self) -> OutcomeKind {
        match self.status_code {
            Some(200) => OutcomeKind::Ok,
            Some(TOO_MANY_REDIRECTS_STATUS) => OutcomeKind::TooManyRedirects,
            Some(status) if (300..400).contains(&status) => OutcomeKind::Redirect,
            Some(_) if self.error_message.is_none() => OutcomeKind::OtherStatus,
            _ => OutcomeKind::Failed,
        }
    }
}
