//! Main application modules.
//!
//! This module provides progress logging, shutdown handling, and statistics
//! printing used by the scan and export commands.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, spawn_progress_logger};
pub use shutdown::shutdown_gracefully;
pub use statistics::{log_status_breakdown, log_summary};
