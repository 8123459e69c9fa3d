//! Redirect-resolving fetcher.
//!
//! Resolves one domain to a [`ScanResult`] by walking its redirects by hand,
//! starting on https and falling back to http once if the connection fails.
//!
//! ```text
//! Start -> AwaitingResponse -> (FollowingRedirect -> AwaitingResponse)*
//!       -> Terminal-OK | Terminal-TooManyRedirects | Terminal-Error
//! ```
//!
//! The one-time scheme fallback loops from AwaitingResponse back to
//! AwaitingResponse without recording a hop.

mod failure;
mod redirects;
mod request;
mod response;

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use log::{debug, info, warn};

use crate::config::TOO_MANY_REDIRECTS_STATUS;
use crate::models::{Hop, ScanResult};
use crate::utils::elapsed_ms;

pub use failure::{
    classify_reqwest_error, describe_reqwest_error, error_chain_message, FailureKind,
    FetchFailure,
};
pub use redirects::{resolve_location, InvalidRedirect, RedirectState};
pub use request::{collect_headers, redirect_location};
pub use response::{read_snippet, snippet_from_bytes};

/// Resolves a domain to a terminal outcome.
///
/// Implementations never fail: every failure mode is encoded in the returned
/// [`ScanResult`]. The orchestrator is generic over this trait so tests can
/// substitute scripted fetchers.
pub trait DomainFetcher: Send + Sync + 'static {
    fn resolve(&self, domain: &str) -> impl Future<Output = ScanResult> + Send;
}

/// How a resolution ended, before timing and bookkeeping are attached.
#[derive(Debug)]
enum Terminal {
    Response {
        status: u16,
        chain: Vec<Hop>,
        snippet: String,
    },
    TooManyRedirects {
        chain: Vec<Hop>,
    },
}

/// HTTP fetcher backed by a shared `reqwest::Client` with redirects disabled.
pub struct Fetcher {
    client: Arc<reqwest::Client>,
    max_redirects: usize,
}

impl Fetcher {
    /// `client` must not follow redirects itself (see `init_client`).
    pub fn new(client: Arc<reqwest::Client>, max_redirects: usize) -> Self {
        Fetcher {
            client,
            max_redirects,
        }
    }

    /// Resolves `domain`, measuring the whole attempt.
    pub async fn resolve_domain(&self, domain: &str) -> ScanResult {
        let start = Instant::now();
        let outcome = self.walk(domain).await;
        let scan_duration_ms = elapsed_ms(start);

        match outcome {
            Ok(Terminal::Response {
                status,
                chain,
                snippet,
            }) => {
                debug!("{domain} resolved to {status} after {} hop(s)", chain.len());
                ScanResult {
                    domain: domain.to_string(),
                    status_code: Some(status),
                    redirect_chain: chain,
                    snippet,
                    error_message: None,
                    last_checked: Utc::now(),
                    scan_duration_ms,
                }
            }
            Ok(Terminal::TooManyRedirects { chain }) => {
                info!("{domain} exceeded {} redirects", self.max_redirects);
                ScanResult {
                    domain: domain.to_string(),
                    status_code: Some(TOO_MANY_REDIRECTS_STATUS),
                    redirect_chain: chain,
                    snippet: String::new(),
                    error_message: Some(format!("Too many redirects (>{})", self.max_redirects)),
                    last_checked: Utc::now(),
                    scan_duration_ms,
                }
            }
            Err(failure) => {
                let error_message = failure.to_error_message();
                warn!("Failed to scan {domain}: {error_message}");
                ScanResult::failure(domain, error_message, scan_duration_ms)
            }
        }
    }

    async fn walk(&self, domain: &str) -> Result<Terminal, FetchFailure> {
        let mut state = RedirectState::start(domain)
            .map_err(|e| FetchFailure::new(FailureKind::InvalidDomain, e.to_string()))?;

        while state.hops_taken() < self.max_redirects {
            let response = match self.send(&state).await {
                Ok(response) => response,
                Err(e) => {
                    let failure = FetchFailure::from_reqwest(&e);
                    if failure.kind.allows_scheme_fallback() {
                        if let Some(fallback) = state.with_http_fallback() {
                            info!("HTTPS failed for {domain} ({}), trying HTTP...", failure.kind);
                            state = fallback;
                            continue;
                        }
                    }
                    return Err(failure);
                }
            };

            let status = response.status().as_u16();
            let location = redirect_location(status, response.headers());
            let hop = Hop {
                url: state.current_url().to_string(),
                status_code: status,
                headers: collect_headers(response.headers()),
            };
            state = state.record(hop);

            if let Some(location) = location {
                let next_url = resolve_location(state.current_url(), &location).map_err(|e| {
                    FetchFailure::new(FailureKind::InvalidRedirect, e.to_string())
                })?;
                debug!("{domain}: {status} -> {next_url}");
                state = state.follow(next_url);
                continue;
            }

            let snippet = if status == 200 {
                match read_snippet(response).await {
                    Ok(snippet) => snippet,
                    Err(e) => {
                        warn!(
                            "Failed to read content for {domain}: {}",
                            describe_reqwest_error(&e)
                        );
                        String::new()
                    }
                }
            } else {
                String::new()
            };

            return Ok(Terminal::Response {
                status,
                chain: state.into_chain(),
                snippet,
            });
        }

        Ok(Terminal::TooManyRedirects {
            chain: state.into_chain(),
        })
    }

    async fn send(&self, state: &RedirectState) -> Result<reqwest::Response, reqwest::Error> {
        let builder = self.client.get(state.current_url().clone());
        request::apply_request_headers(builder).send().await
    }
}

impl DomainFetcher for Fetcher {
    fn resolve(&self, domain: &str) -> impl Future<Output = ScanResult> + Send {
        self.resolve_domain(domain)
    }
}
