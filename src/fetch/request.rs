//! HTTP request building and header extraction.

use reqwest::header::HeaderMap;

use crate::config::ACCEPT_HEADER_VALUE;
use crate::models::HopHeaders;

/// Applies the fixed per-hop request headers to a `reqwest::RequestBuilder`.
///
/// The User-Agent is set once on the client; only Accept varies per request
/// builder.
pub(crate) fn apply_request_headers(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    builder.header(reqwest::header::ACCEPT, ACCEPT_HEADER_VALUE)
}

/// Captures every response header for a hop.
///
/// Names are lower-case (as `HeaderMap` stores them). Repeated headers are
/// joined with `", "`; non-UTF-8 bytes are decoded lossily.
pub fn collect_headers(headers: &HeaderMap) -> HopHeaders {
    let mut collected = HopHeaders::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}

/// Returns the Location header of a redirect response.
///
/// `None` unless the status is in [300, 400) and a Location header is present.
pub fn redirect_location(status: u16, headers: &HeaderMap) -> Option<String> {
    if !(300..400).contains(&status) {
        return None;
    }
    headers
        .get(reqwest::header::LOCATION)
        .map(|loc| String::from_utf8_lossy(loc.as_bytes()).trim().to_string())
        .filter(|loc| !loc.is_empty())
}
