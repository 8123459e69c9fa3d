//! Terminal response body handling.

use crate::config::{SNIPPET_MAX_BYTES, SNIPPET_MAX_CHARS};
use crate::utils::{collapse_whitespace, truncate_chars};

/// Reads the start of a 200 body and turns it into a snippet.
///
/// At most `SNIPPET_MAX_BYTES` are buffered; the rest of the body is never
/// downloaded.
///
/// # Errors
///
/// Returns the transport error if a body chunk cannot be read.
pub async fn read_snippet(mut response: reqwest::Response) -> Result<String, reqwest::Error> {
    let mut body: Vec<u8> = Vec::new();
    while body.len() < SNIPPET_MAX_BYTES {
        match response.chunk().await? {
            Some(chunk) => body.extend_from_slice(&chunk),
            None => break,
        }
    }
    body.truncate(SNIPPET_MAX_BYTES);
    Ok(snippet_from_bytes(&body))
}

/// Decodes bytes lossily, keeps the first `SNIPPET_MAX_CHARS` characters and
/// collapses whitespace.
pub fn snippet_from_bytes(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    collapse_whitespace(truncate_chars(&text, SNIPPET_MAX_CHARS))
}
