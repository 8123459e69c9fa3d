//! Error type definitions.
//!
//! This module defines the typed errors raised while setting up or persisting a
//! scan, and the diagnostic categories failures are grouped into.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
///
/// Any of these aborts a scan: a lost write would break the skip/retry filtering
/// of the next run.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Redirect chain could not be encoded for storage.
    #[error("Redirect chain serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Diagnostic categories for stored failure messages.
///
/// Categories are assigned by substring matching over `error_message` text and
/// never influence retry eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum ErrorCategory {
    ConnectionTimeout,
    ReadTimeout,
    ConnectionError,
    DnsResolution,
    TlsError,
    TooManyRedirects,
    Other,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::ConnectionTimeout => "Connection timeout",
            ErrorCategory::ReadTimeout => "Read timeout",
            ErrorCategory::ConnectionError => "Connection error",
            ErrorCategory::DnsResolution => "DNS resolution",
            ErrorCategory::TlsError => "TLS error",
            ErrorCategory::TooManyRedirects => "Too many redirects",
            ErrorCategory::Other => "Other",
        }
    }
}
