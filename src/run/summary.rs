//! Scan summary and per-batch tallies.

use crate::error_handling::ErrorBreakdown;
use crate::models::OutcomeKind;

/// Statistics of one scan pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Domains resolved in this pass (the scan set)
    pub total_scanned: usize,
    /// New terminal 200 results
    pub new_200: usize,
    /// New terminal 3xx results
    pub new_3xx: usize,
    /// New redirect-limit (999) results
    pub new_999: usize,
    /// New results with any other terminal status
    pub new_other: usize,
    /// Domains with no terminal status, including tasks that panicked
    pub failed: usize,
    /// Input domains not scanned (cached or repeated)
    pub skipped: usize,
    pub elapsed_seconds: f64,
    /// Categories of the stored error messages of the scanned domains
    pub error_breakdown: ErrorBreakdown,
}

impl Summary {
    /// Summary of a pass that scanned nothing.
    pub fn empty(skipped: usize, elapsed_seconds: f64) -> Self {
        Summary {
            total_scanned: 0,
            new_200: 0,
            new_3xx: 0,
            new_999: 0,
            new_other: 0,
            failed: 0,
            skipped,
            elapsed_seconds,
            error_breakdown: ErrorBreakdown::new(),
        }
    }

    /// Number of new outcomes of any kind.
    pub fn new_outcomes(&self) -> usize {
        self.new_200 + self.new_3xx + self.new_999 + self.new_other + self.failed
    }
}

/// Outcome counts reduced from the tasks of one or more batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub ok: usize,
    pub redirect: usize,
    pub too_many_redirects: usize,
    pub other_status: usize,
    pub failed: usize,
}

impl Tally {
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Ok => self.ok += 1,
            OutcomeKind::Redirect => self.redirect += 1,
            OutcomeKind::TooManyRedirects => self.too_many_redirects += 1,
            OutcomeKind::OtherStatus => self.other_status += 1,
            OutcomeKind::Failed => self.failed += 1,
        }
    }

    /// Counts a task that ended without producing a result.
    pub fn record_lost_task(&mut self) {
        self.failed += 1;
    }

    pub fn merge(&mut self, other: Tally) {
        self.ok += other.ok;
        self.redirect += other.redirect;
        self.too_many_redirects += other.too_many_redirects;
        self.other_status += other.other_status;
        self.failed += other.failed;
    }

    pub fn total(&self) -> usize {
        self.ok + self.redirect + self.too_many_redirects + self.other_status + self.failed
    }

    pub fn into_summary(
        self,
        total_scanned: usize,
        skipped: usize,
        elapsed_seconds: f64,
        error_breakdown: ErrorBreakdown,
    ) -> Summary {
        Summary {
            total_scanned,
            new_200: self.ok,
            new_3xx: self.redirect,
            new_999: self.too_many_redirects,
            new_other: self.other_status,
            failed: self.failed,
            skipped,
            elapsed_seconds,
            error_breakdown,
        }
    }
}
