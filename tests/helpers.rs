// Shared test helpers for store setup and scripted fetchers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tempfile::{NamedTempFile, TempDir};

use subdomain_status::{DomainFetcher, Hop, ResultStore, ScanResult};

/// Opens a store in a fresh temporary directory.
/// The `TempDir` must outlive the store.
pub async fn create_test_store() -> (ResultStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = ResultStore::open(&db_path_in(&dir), 4)
        .await
        .expect("Failed to open test store");
    (store, dir)
}

pub fn db_path_in(dir: &TempDir) -> PathBuf {
    dir.path().join("scan_results.db")
}

/// Writes one domain per line to a temporary file.
pub fn write_domains_to_file(domains: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for domain in domains {
        writeln!(file, "{domain}").expect("Failed to write domain");
    }
    file.flush().expect("Failed to flush domains file");
    file
}

pub fn domain_list(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("host{i}.example.com")).collect()
}

/// A 200 result reached in one hop.
pub fn ok_result(domain: &str) -> ScanResult {
    ScanResult {
        domain: domain.to_string(),
        status_code: Some(200),
        redirect_chain: vec![Hop {
            url: format!("https://{domain}/"),
            status_code: 200,
            headers: Default::default(),
        }],
        snippet: "<html>ok</html>".to_string(),
        error_message: None,
        last_checked: Utc::now(),
        scan_duration_ms: 0,
    }
}

/// What a [`ScriptedFetcher`] does for one domain.
#[derive(Clone)]
pub enum Script {
    Ok,
    Fail(&'static str),
    Panic,
}

/// Fetcher that answers from a script, counts calls per domain, and tracks
/// the peak number of simultaneous resolutions.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    scripts: Arc<HashMap<String, Script>>,
    delay: Duration,
    calls: Arc<Mutex<HashMap<String, usize>>>,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    /// Every domain resolves to 200 unless scripted otherwise.
    pub fn new(scripts: HashMap<String, Script>) -> Self {
        ScriptedFetcher {
            scripts: Arc::new(scripts),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls_for(&self, domain: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(domain)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl DomainFetcher for ScriptedFetcher {
    fn resolve(&self, domain: &str) -> impl Future<Output = ScanResult> + Send {
        let domain = domain.to_string();
        let script = self.scripts.get(&domain).cloned().unwrap_or(Script::Ok);
        let this = self.clone();
        async move {
            *this.calls.lock().unwrap().entry(domain.clone()).or_insert(0) += 1;
            let current = this.active.fetch_add(1, Ordering::SeqCst) + 1;
            this.peak.fetch_max(current, Ordering::SeqCst);

            if !this.delay.is_zero() {
                tokio::time::sleep(this.delay).await;
            }
            this.active.fetch_sub(1, Ordering::SeqCst);

            match script {
                Script::Ok => ok_result(&domain),
                Script::Fail(message) => ScanResult::failure(&domain, message.to_string(), 0),
                Script::Panic => panic!("scripted panic for {domain}"),
            }
        }
    }
}
