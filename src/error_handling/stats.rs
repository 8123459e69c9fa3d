//! Error category tallies.
//!
//! Built once per scan from the stored failure messages of the domains that
//! were scanned, after every batch has completed.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::categorization::categorize_error_message;
use super::types::ErrorCategory;

/// Count of failures per [`ErrorCategory`].
///
/// Every category is present (initialized to zero) so reports list them in a
/// stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBreakdown {
    counts: BTreeMap<ErrorCategory, usize>,
}

impl ErrorBreakdown {
    pub fn new() -> Self {
        let counts = ErrorCategory::iter().map(|c| (c, 0)).collect();
        ErrorBreakdown { counts }
    }

    /// Builds a breakdown by categorizing each message.
    pub fn from_messages<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut breakdown = Self::new();
        for message in messages {
            breakdown.record(categorize_error_message(message));
        }
        breakdown
    }

    pub fn record(&mut self, category: ErrorCategory) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub fn get(&self, category: ErrorCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates categories in declaration order, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorCategory, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }
}

impl Default for ErrorBreakdown {
    fn default() -> Self {
        Self::new()
    }
}
