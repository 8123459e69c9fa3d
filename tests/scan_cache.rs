//! Orchestration and cache properties, exercised with scripted fetchers.
//!
//! No network access: every resolution is answered by a stub fetcher.

mod helpers;

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use helpers::{create_test_store, domain_list, ok_result, Script, ScriptedFetcher};
use subdomain_status::{DomainFetcher, ErrorCategory, ResultStore, ScanResult, Scanner};

/// Closes the store's pool while resolving, so every write after it fails.
#[derive(Clone)]
struct PoolClosingFetcher {
    store: ResultStore,
    calls: Arc<AtomicUsize>,
}

impl DomainFetcher for PoolClosingFetcher {
    fn resolve(&self, domain: &str) -> impl Future<Output = ScanResult> + Send {
        let domain = domain.to_string();
        let this = self.clone();
        async move {
            this.calls.fetch_add(1, Ordering::SeqCst);
            this.store.pool().close().await;
            ok_result(&domain)
        }
    }
}

#[tokio::test]
async fn test_rescan_of_cached_domains_is_idempotent() {
    let (store, _dir) = create_test_store().await;
    let domains = domain_list(12);

    let fetcher = ScriptedFetcher::new(HashMap::new());
    let scanner = Scanner::new(fetcher.clone(), store.clone(), 4, 5);

    let first = scanner.scan(&domains, false).await.unwrap();
    assert_eq!(first.total_scanned, 12);
    assert_eq!(first.new_200, 12);
    assert_eq!(first.skipped, 0);

    let second = scanner.scan(&domains, false).await.unwrap();
    assert_eq!(second.skipped, domains.len());
    assert_eq!(second.total_scanned, 0);
    assert_eq!(second.new_outcomes(), 0);
    assert_eq!(fetcher.total_calls(), 12);
    assert_eq!(store.count().await.unwrap(), 12);
}

#[tokio::test]
async fn test_repeated_domain_is_scanned_once() {
    let (store, _dir) = create_test_store().await;
    let domains: Vec<String> = ["a.example.com", "b.example.com", "a.example.com"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let fetcher = ScriptedFetcher::new(HashMap::new());
    let scanner = Scanner::new(fetcher.clone(), store.clone(), 8, 200);
    let summary = scanner.scan(&domains, false).await.unwrap();

    assert_eq!(summary.total_scanned, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(fetcher.calls_for("a.example.com"), 1);
    assert_eq!(store.count().await.unwrap(), 2);

    let row = store.get("a.example.com").await.unwrap().unwrap();
    let isolated = ok_result("a.example.com");
    assert_eq!(row.status_code, isolated.status_code);
    assert_eq!(row.snippet.as_deref(), Some(isolated.snippet.as_str()));
}

#[tokio::test]
async fn test_rescan_failed_reincludes_only_failures() {
    let (store, _dir) = create_test_store().await;
    store
        .upsert(&ScanResult::failure(
            "down.example.com",
            "ConnectError: Connection refused".to_string(),
            5,
        ))
        .await
        .unwrap();
    store.upsert(&ok_result("up.example.com")).await.unwrap();

    let fetcher = ScriptedFetcher::new(HashMap::new());
    let scanner = Scanner::new(fetcher.clone(), store.clone(), 4, 10);
    let domains = vec!["down.example.com".to_string(), "up.example.com".to_string()];

    let summary = scanner.scan(&domains, true).await.unwrap();

    assert_eq!(fetcher.calls_for("down.example.com"), 1);
    assert_eq!(fetcher.calls_for("up.example.com"), 0);
    assert_eq!(summary.total_scanned, 1);
    assert_eq!(summary.new_200, 1);
    assert_eq!(summary.skipped, 1);
    assert!(store.failed_domains().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_peak_concurrency_is_bounded() {
    let (store, _dir) = create_test_store().await;
    let domains = domain_list(40);

    let fetcher = ScriptedFetcher::new(HashMap::new()).with_delay(Duration::from_millis(20));
    let scanner = Scanner::new(fetcher.clone(), store, 3, 16);
    let summary = scanner.scan(&domains, false).await.unwrap();

    assert_eq!(summary.new_200, 40);
    assert!(fetcher.peak() <= 3, "peak was {}", fetcher.peak());
    assert!(fetcher.peak() >= 1);
}

#[tokio::test]
async fn test_empty_scan_set() {
    let (store, _dir) = create_test_store().await;
    let fetcher = ScriptedFetcher::new(HashMap::new());
    let scanner = Scanner::new(fetcher.clone(), store, 4, 10);

    let summary = scanner.scan(&[], false).await.unwrap();
    assert_eq!(summary.total_scanned, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.new_outcomes(), 0);
    assert_eq!(fetcher.total_calls(), 0);
}

#[tokio::test]
async fn test_panicking_task_counts_as_failed() {
    let (store, _dir) = create_test_store().await;
    let scripts = HashMap::from([("boom.example.com".to_string(), Script::Panic)]);
    let domains: Vec<String> = ["a.example.com", "boom.example.com", "b.example.com"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let scanner = Scanner::new(ScriptedFetcher::new(scripts), store.clone(), 2, 10);
    let summary = scanner.scan(&domains, false).await.unwrap();

    assert_eq!(summary.total_scanned, 3);
    assert_eq!(summary.new_200, 2);
    assert_eq!(summary.failed, 1);
    assert!(store.get("boom.example.com").await.unwrap().is_none());
    assert!(store.get("b.example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_error_breakdown_covers_scanned_failures() {
    let (store, _dir) = create_test_store().await;
    // Stored failure outside this pass must not be counted
    store
        .upsert(&ScanResult::failure(
            "old.example.com",
            "DnsError: no such host".to_string(),
            1,
        ))
        .await
        .unwrap();

    let scripts = HashMap::from([
        (
            "slow.example.com".to_string(),
            Script::Fail("ConnectTimeout: connect timed out"),
        ),
        (
            "gone.example.com".to_string(),
            Script::Fail("DnsError: dns error: failed to lookup address information"),
        ),
        (
            "odd.example.com".to_string(),
            Script::Fail("RequestError: something unexpected"),
        ),
    ]);
    let domains: Vec<String> = [
        "slow.example.com",
        "gone.example.com",
        "odd.example.com",
        "fine.example.com",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let scanner = Scanner::new(ScriptedFetcher::new(scripts), store, 4, 2);
    let summary = scanner.scan(&domains, false).await.unwrap();

    assert_eq!(summary.failed, 3);
    assert_eq!(summary.new_200, 1);
    let breakdown = &summary.error_breakdown;
    assert_eq!(breakdown.get(ErrorCategory::ConnectionTimeout), 1);
    assert_eq!(breakdown.get(ErrorCategory::DnsResolution), 1);
    assert_eq!(breakdown.get(ErrorCategory::Other), 1);
    assert_eq!(breakdown.total(), 3);
}

#[tokio::test]
async fn test_unreadable_store_aborts_scan() {
    let (store, _dir) = create_test_store().await;
    store.pool().close().await;

    let scanner = Scanner::new(ScriptedFetcher::new(HashMap::new()), store, 2, 2);
    let result = scanner.scan(&domain_list(3), false).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_write_failure_drains_batch_then_aborts_scan() {
    let (store, _dir) = create_test_store().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = PoolClosingFetcher {
        store: store.clone(),
        calls: Arc::clone(&calls),
    };

    let scanner = Scanner::new(fetcher, store, 2, 2);
    let err = scanner
        .scan(&domain_list(5), false)
        .await
        .expect_err("a failed write must abort the scan");

    assert!(
        format!("{err:#}").contains("Failed to store scan result"),
        "unexpected error: {err:#}"
    );
    // The whole first batch ran; no later batch was started
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
