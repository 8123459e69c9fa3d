//! Configuration constants.
//!
//! This module defines the constants used throughout the scanner, including
//! timeouts, size limits, and the redirect-limit sentinel.

// Concurrency and batching defaults
/// Maximum concurrent domain resolutions (semaphore limit)
pub const DEFAULT_MAX_CONCURRENCY: usize = 80;
/// Number of domains spawned per batch before waiting for the batch to drain
pub const DEFAULT_BATCH_SIZE: usize = 200;
/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: u64 = 5;
pub const DB_PATH: &str = "./scan_results.db";

// Network operation timeouts
/// Total per-request timeout in seconds (connect + send + receive)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// TCP/TLS connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Identifies the scanner honestly rather than imitating a browser.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SubdomainScanner/1.0)";

/// Accept header sent with every hop.
pub const ACCEPT_HEADER_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

// Connection pools
/// Maximum idle keep-alive connections kept per host by the HTTP client
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;
/// Upper bound on SQLite pool connections
/// Writes are serialized by SQLite anyway, so more connections only add lock contention
pub const DB_POOL_MAX_CONNECTIONS: u32 = 16;
/// How long a task waits for a database connection before the write fails
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;
/// SQLite busy timeout in seconds
pub const DB_BUSY_TIMEOUT_SECS: u64 = 10;

// Redirect handling
/// Maximum number of hops recorded for one domain
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;
/// Status code stored when the redirect limit is exhausted
pub const TOO_MANY_REDIRECTS_STATUS: u16 = 999;

// Content and message size limits
/// Maximum snippet length in characters
pub const SNIPPET_MAX_CHARS: usize = 2048;
/// Maximum bytes buffered from a 200 body.
/// Four bytes per character covers the longest UTF-8 encoding of the snippet.
pub const SNIPPET_MAX_BYTES: usize = SNIPPET_MAX_CHARS * 4;
/// Snippet length in characters when exporting rows
pub const EXPORT_SNIPPET_MAX_CHARS: usize = 200;
/// Maximum error message length in characters (2000 chars)
/// Error messages longer than this are truncated with a note about the original length
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

/// Status codes treated as redirects by the `--only-3xx` export preset
pub const REDIRECT_EXPORT_STATUSES: &[u16] = &[301, 302, 303, 307, 308];
