//! Classification of transport failures.
//!
//! A failed attempt is stored as `"<kind>: <message>"`. The kind decides
//! whether the https→http fallback applies; the message keeps the whole
//! source chain so the stored text is useful on its own.

use std::error::Error as StdError;

use crate::utils::sanitize_and_truncate_error_message;

/// Kind of a failed HTTP attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// TCP connect failed (refused, reset, unreachable)
    ConnectError,
    /// Connect did not complete within the connect timeout
    ConnectTimeout,
    /// The request or body did not complete within the total timeout
    ReadTimeout,
    /// Host name could not be resolved
    DnsError,
    /// TLS handshake or certificate failure
    TlsError,
    /// Request could not be built or sent
    RequestError,
    /// The domain does not form a valid URL
    InvalidDomain,
    /// A Location header could not be followed
    InvalidRedirect,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ConnectError => "ConnectError",
            FailureKind::ConnectTimeout => "ConnectTimeout",
            FailureKind::ReadTimeout => "ReadTimeout",
            FailureKind::DnsError => "DnsError",
            FailureKind::TlsError => "TlsError",
            FailureKind::RequestError => "RequestError",
            FailureKind::InvalidDomain => "InvalidDomain",
            FailureKind::InvalidRedirect => "InvalidRedirect",
        }
    }

    /// Whether an https attempt failing this way is retried once over http.
    ///
    /// Connection-level failures qualify, including TLS handshake failures
    /// (a plain-HTTP listener on the TLS port fails the handshake). DNS
    /// failures and timeouts would fail the same way over http.
    pub fn allows_scheme_fallback(&self) -> bool {
        matches!(self, FailureKind::ConnectError | FailureKind::TlsError)
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed attempt, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        FetchFailure {
            kind,
            message: message.into(),
        }
    }

    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        FetchFailure::new(classify_reqwest_error(error), describe_reqwest_error(error))
    }

    /// Stored form: `"<kind>: <message>"`, sanitized and length-capped.
    pub fn to_error_message(&self) -> String {
        sanitize_and_truncate_error_message(&format!("{}: {}", self.kind, self.message))
    }
}

const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "no such host",
    "nodename nor servname",
];
const TLS_MARKERS: &[&str] = &[
    "certificate",
    "tls",
    "ssl",
    "handshake",
    "invalid peer",
];

/// Maps a `reqwest::Error` onto a [`FailureKind`].
///
/// reqwest only exposes coarse predicates, so DNS and TLS failures are told
/// apart from plain connect errors by their source-chain text.
pub fn classify_reqwest_error(error: &reqwest::Error) -> FailureKind {
    let causes = describe_reqwest_error(error).to_lowercase();

    if error.is_timeout() {
        if error.is_connect() {
            FailureKind::ConnectTimeout
        } else {
            FailureKind::ReadTimeout
        }
    } else if error.is_connect() {
        if DNS_MARKERS.iter().any(|m| causes.contains(m)) {
            FailureKind::DnsError
        } else if TLS_MARKERS.iter().any(|m| causes.contains(m)) {
            FailureKind::TlsError
        } else {
            FailureKind::ConnectError
        }
    } else if error.is_builder() {
        FailureKind::InvalidDomain
    } else if (error.is_body() || error.is_decode()) && causes.contains("timed out") {
        FailureKind::ReadTimeout
    } else {
        FailureKind::RequestError
    }
}

/// Describes a reqwest error by its causes.
///
/// The top-level reqwest message embeds the request URL, which would leak
/// host names into substring matching, so only the sources are used when
/// there are any.
pub fn describe_reqwest_error(error: &reqwest::Error) -> String {
    match error.source() {
        Some(source) => error_chain_message(source),
        None => error.to_string(),
    }
}

/// Joins an error and all of its sources with `": "`.
///
/// Adjacent duplicates are skipped; hyper and reqwest often repeat the same
/// text one level down.
pub fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        let text = err.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
        current = err.source();
    }
    parts.join(": ")
}
