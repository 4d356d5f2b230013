//! Metrics collected during batch valuation

use crate::error::EngineError;
use std::time::Duration;

/// Outcome counts for one batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchMetrics {
    /// Items valued
    pub succeeded: usize,

    /// Items rejected or failed for another reason
    pub failed: usize,

    /// Items that ran out of time
    pub timed_out: usize,

    /// Items cancelled before finishing
    pub cancelled: usize,

    /// Wall-clock time of the whole batch
    pub elapsed: Duration,
}

impl BatchMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one item's outcome
    pub fn record<V>(&mut self, outcome: &Result<V, EngineError>) {
        match outcome {
            Ok(_) => self.succeeded += 1,
            Err(EngineError::Timeout(_)) => self.timed_out += 1,
            Err(EngineError::Cancelled) => self.cancelled += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Total items recorded
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.timed_out + self.cancelled
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} items in {:.1}s: {} succeeded, {} failed, {} timed out, {} cancelled",
            self.total(),
            self.elapsed.as_secs_f64(),
            self.succeeded,
            self.failed,
            self.timed_out,
            self.cancelled
        )
    }
}
