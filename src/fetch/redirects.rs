//! Redirect chain state.
//!
//! A [`RedirectState`] is the value threaded through the resolution loop. Each
//! transition consumes the old state and returns a new one, so a chain is only
//! ever extended, and a finished chain is frozen by [`RedirectState::into_chain`].

use url::Url;

use crate::models::Hop;

/// Why a Location header could not be turned into the next URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRedirect {
    pub location: String,
    pub reason: String,
}

impl std::fmt::Display for InvalidRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot follow Location '{}': {}", self.location, self.reason)
    }
}

/// Position of one domain's resolution: the URL to request next and the hops
/// recorded so far.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectState {
    current_url: Url,
    chain: Vec<Hop>,
    fallback_used: bool,
}

impl RedirectState {
    /// Starts a resolution at `https://{domain}`.
    pub fn start(domain: &str) -> Result<Self, url::ParseError> {
        let current_url = Url::parse(&format!("https://{domain}"))?;
        Ok(RedirectState {
            current_url,
            chain: Vec::new(),
            fallback_used: false,
        })
    }

    pub fn current_url(&self) -> &Url {
        &self.current_url
    }

    /// Number of hops recorded so far.
    pub fn hops_taken(&self) -> usize {
        self.chain.len()
    }

    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    /// Appends a recorded exchange.
    pub fn record(mut self, hop: Hop) -> Self {
        self.chain.push(hop);
        self
    }

    /// Moves on to the next URL of the chain.
    pub fn follow(mut self, next_url: Url) -> Self {
        self.current_url = next_url;
        self
    }

    /// Returns the same position on `http://`, if the one-time fallback is
    /// still available and the current URL is on https.
    ///
    /// The hop count is carried over, not reset.
    pub fn with_http_fallback(&self) -> Option<Self> {
        if self.fallback_used || self.current_url.scheme() != "https" {
            return None;
        }
        let mut next_url = self.current_url.clone();
        next_url.set_scheme("http").ok()?;
        Some(RedirectState {
            current_url: next_url,
            chain: self.chain.clone(),
            fallback_used: true,
        })
    }

    pub fn into_chain(self) -> Vec<Hop> {
        self.chain
    }
}

/// Resolves a Location header value against the current URL.
///
/// - An absolute `http`/`https` URL is used as-is.
/// - A value starting with `/` is appended to the current scheme and host.
/// - Any other value is rooted at the current host (`scheme://host/value`),
///   not resolved against the current path.
pub fn resolve_location(current: &Url, location: &str) -> Result<Url, InvalidRedirect> {
    let invalid = |reason: String| InvalidRedirect {
        location: location.to_string(),
        reason,
    };

    if let Ok(absolute) = Url::parse(location) {
        return match absolute.scheme() {
            "http" | "https" => Ok(absolute),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        };
    }

    let host = current
        .host_str()
        .ok_or_else(|| invalid("current URL has no host".to_string()))?;
    let origin = match current.port() {
        Some(port) => format!("{}://{}:{}", current.scheme(), host, port),
        None => format!("{}://{}", current.scheme(), host),
    };

    let next = if location.starts_with('/') {
        format!("{origin}{location}")
    } else {
        format!("{origin}/{location}")
    };
    Url::parse(&next).map_err(|e| invalid(e.to_string()))
}
