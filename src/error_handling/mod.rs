//! Error handling and failure statistics.
//!
//! This module provides:
//! - Typed initialization and database errors
//! - Diagnostic categorization of stored failure messages
//! - Per-scan category tallies

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_error_message;
pub use stats::ErrorBreakdown;
pub use types::{DatabaseError, ErrorCategory, InitializationError};
