//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a scan:
//! - HTTP client (redirects disabled, timeouts)
//! - Concurrency semaphore
//! - Logger

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// One permit is held for the entire resolution of one domain, every hop
/// included.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
