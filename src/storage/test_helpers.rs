//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and test data creation
//! used across storage module tests.

use chrono::Utc;
use tempfile::TempDir;

use crate::config::TOO_MANY_REDIRECTS_STATUS;
use crate::models::{Hop, HopHeaders, ScanResult};
use crate::storage::ResultStore;

/// Creates a store backed by a fresh database file.
///
/// The returned `TempDir` must be kept alive for the duration of the test.
pub async fn create_test_store() -> (ResultStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = ResultStore::open(&dir.path().join("test.db"), 4)
        .await
        .expect("Failed to open test store");
    (store, dir)
}

/// A terminal result with `status`, reached in one hop.
pub fn result_with_status(domain: &str, status: u16) -> ScanResult {
    let error_message = (status == TOO_MANY_REDIRECTS_STATUS)
        .then(|| "Too many redirects (>10)".to_string());
    ScanResult {
        domain: domain.to_string(),
        status_code: Some(status),
        redirect_chain: vec![Hop {
            url: format!("https://{domain}/"),
            status_code: status,
            headers: HopHeaders::from([("server".to_string(), "test".to_string())]),
        }],
        snippet: if status == 200 {
            "<html>ok</html>".to_string()
        } else {
            String::new()
        },
        error_message,
        last_checked: Utc::now(),
        scan_duration_ms: 42,
    }
}

/// A hard failure with no status and an empty chain.
pub fn failed_result(domain: &str, error_message: &str) -> ScanResult {
    ScanResult::failure(domain, error_message.to_string(), 7)
}
