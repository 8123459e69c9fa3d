//! Utility functions.
//!
//! This module provides:
//! - String sanitization and truncation utilities
//! - Millisecond timing helpers

pub mod sanitize;

use std::time::{Duration, Instant};

pub use sanitize::{collapse_whitespace, sanitize_and_truncate_error_message, truncate_chars};

/// Converts a duration to whole milliseconds, saturating at `i64::MAX`.
pub fn duration_to_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Whole milliseconds elapsed since `start`.
pub fn elapsed_ms(start: Instant) -> i64 {
    duration_to_ms(start.elapsed())
}
