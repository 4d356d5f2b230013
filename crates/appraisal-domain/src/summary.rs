//! Valuation summary - the statistical verdict over all signals

use crate::confidence::ConfidenceTier;
use crate::distribution::DistributionStats;
use crate::money::format_usd;
use std::fmt;

/// Outcome class of a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuationStatus {
    /// No source produced anything usable
    NoData,
    /// The structured source claimed sales, but no usable price survived
    LimitedData,
    /// At least one signal was available
    Success,
}

impl ValuationStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationStatus::NoData => "no_data",
            ValuationStatus::LimitedData => "limited_data",
            ValuationStatus::Success => "success",
        }
    }
}

impl fmt::Display for ValuationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one valuation's price distribution
///
/// Invariants: `status == Success` iff `sample_size >= 1`, and `confidence`
/// is derived from `sample_size` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationSummary {
    /// Outcome class
    pub status: ValuationStatus,

    /// Robust (low, high) range, absent without data
    pub range: Option<(f64, f64)>,

    /// Mean of the weighted sample, rounded to cents
    pub point_estimate: Option<f64>,

    /// Confidence tier
    pub confidence: ConfidenceTier,

    /// Number of signals in the combined sample
    pub sample_size: usize,

    /// Number of distinct prices in the combined sample
    pub distinct_values: usize,

    /// Full distribution statistics, absent without data
    pub stats: Option<DistributionStats>,

    /// Human-readable notes about the sources
    pub insights: Vec<String>,
}

impl ValuationSummary {
    /// Summary for a valuation without any usable signal
    pub fn empty(status: ValuationStatus, insights: Vec<String>) -> Self {
        debug_assert!(status != ValuationStatus::Success);
        Self {
            status,
            range: None,
            point_estimate: None,
            confidence: ConfidenceTier::None,
            sample_size: 0,
            distinct_values: 0,
            stats: None,
            insights,
        }
    }

    /// Whether the summary carries a numeric range
    pub fn is_success(&self) -> bool {
        self.status == ValuationStatus::Success
    }

    /// Lower range bound
    pub fn lower_quartile(&self) -> Option<f64> {
        self.range.map(|(low, _)| low)
    }

    /// Upper range bound
    pub fn upper_quartile(&self) -> Option<f64> {
        self.range.map(|(_, high)| high)
    }

    /// Range formatted for people, e.g. `$80 - $150`
    pub fn range_label(&self) -> String {
        match self.range {
            Some((low, high)) => format!("{} - {}", format_usd(low, 0), format_usd(high, 0)),
            None => "Unable to determine".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = ValuationSummary::empty(ValuationStatus::NoData, Vec::new());
        assert!(!summary.is_success());
        assert_eq!(summary.confidence, ConfidenceTier::None);
        assert_eq!(summary.sample_size, 0);
        assert_eq!(summary.range_label(), "Unable to determine");
        assert!(summary.lower_quartile().is_none());
    }

    #[test]
    fn test_range_label() {
        let summary = ValuationSummary {
            status: ValuationStatus::Success,
            range: Some((1200.0, 4500.0)),
            point_estimate: Some(2500.0),
            confidence: ConfidenceTier::Medium,
            sample_size: 7,
            distinct_values: 7,
            stats: None,
            insights: Vec::new(),
        };
        assert_eq!(summary.range_label(), "$1,200 - $4,500");
        assert_eq!(summary.lower_quartile(), Some(1200.0));
        assert_eq!(summary.upper_quartile(), Some(4500.0));
    }
}
