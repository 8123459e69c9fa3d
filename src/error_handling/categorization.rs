//! Error categorization.
//!
//! Maps free-form stored failure messages onto [`ErrorCategory`] buckets. The
//! messages come from `FailureKind` prefixes plus the transport's own error
//! text, so matching is best effort.

use super::types::ErrorCategory;

const TOO_MANY_REDIRECTS_PATTERNS: &[&str] = &["too many redirects"];
const DNS_PATTERNS: &[&str] = &[
    "dnserror",
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "temporary failure in name resolution",
    "name resolution",
];
const TLS_PATTERNS: &[&str] = &[
    "tlserror",
    "tls handshake",
    "ssl error",
    "certificate",
    "handshake",
];
/// Failures whose message embeds caller-supplied text (a Location value or
/// the domain itself), which must not be pattern matched.
const URL_FAILURE_PREFIXES: &[&str] = &["invalidredirect:", "invaliddomain:"];
const CONNECT_TIMEOUT_PATTERNS: &[&str] = &[
    "connecttimeout",
    "connect timeout",
    "connection timed out",
];
const READ_TIMEOUT_PATTERNS: &[&str] = &["readtimeout", "read timeout", "timed out", "timeout"];
const CONNECTION_PATTERNS: &[&str] = &[
    "connecterror",
    "connection refused",
    "connection reset",
    "connection closed",
    "error trying to connect",
    "network is unreachable",
];

/// Categorizes a stored error message.
///
/// Patterns are checked from most to least specific: a TLS handshake that
/// timed out counts as a TLS error, a connect timeout is not a read timeout.
pub fn categorize_error_message(message: &str) -> ErrorCategory {
    let msg = message.to_lowercase();
    let matches = |patterns: &[&str]| patterns.iter().any(|p| msg.contains(p));

    if URL_FAILURE_PREFIXES.iter().any(|p| msg.starts_with(p)) {
        ErrorCategory::Other
    } else if matches(TOO_MANY_REDIRECTS_PATTERNS) {
        ErrorCategory::TooManyRedirects
    } else if matches(DNS_PATTERNS) {
        ErrorCategory::DnsResolution
    } else if matches(TLS_PATTERNS) {
        ErrorCategory::TlsError
    } else if matches(CONNECT_TIMEOUT_PATTERNS) {
        ErrorCategory::ConnectionTimeout
    } else if matches(READ_TIMEOUT_PATTERNS) {
        ErrorCategory::ReadTimeout
    } else if matches(CONNECTION_PATTERNS) {
        ErrorCategory::ConnectionError
    } else {
        ErrorCategory::Other
    }
}
