//! HTTP client initialization.
//!
//! A single client is shared by every resolution task. Redirects are disabled
//! so each hop can be recorded by hand.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{Config, HTTP_POOL_MAX_IDLE_PER_HOST};

/// Initializes the shared HTTP client for manual redirect resolution.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Connect and total-request timeouts from the config
/// - Redirect following disabled
/// - Idle connection pool capped by `max_concurrency` (and `HTTP_POOL_MAX_IDLE_PER_HOST`)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(config.max_concurrency.min(HTTP_POOL_MAX_IDLE_PER_HOST))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
