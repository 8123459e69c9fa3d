//! Text sanitizing and truncation helpers.
//!
//! Error messages are stripped of control characters and capped before they
//! are stored; snippets are whitespace-collapsed and cut on character
//! boundaries.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Removes control characters (0x00-0x1F except tab, newline, carriage return).
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_ascii_control() || matches!(c, '\t' | '\n' | '\r'))
        .filter(|c| *c != '\u{7f}')
        .collect()
}

/// Sanitizes a message and truncates it to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// A truncated message ends with a note carrying the original length.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let char_count = sanitized.chars().count();

    if char_count > MAX_ERROR_MESSAGE_LENGTH {
        // Leave room for the truncation note
        let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        format!(
            "{}... (truncated, original length: {} chars)",
            truncate_chars(&sanitized, keep),
            char_count
        )
    } else {
        sanitized
    }
}

/// Returns the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Collapses every run of whitespace to one space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
