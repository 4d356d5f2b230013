//! Weighted price distribution and robust statistics

use crate::signal::{PriceSignal, Provenance};

/// Default sample size above which quartiles replace min/max as range bounds
pub const DEFAULT_ROBUST_ABOVE: usize = 4;

/// Ordered sequence of price signals
///
/// Duplicates are kept on purpose: repeated structured observations are how
/// completed sales gain weight over speculative mentions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceDistribution {
    signals: Vec<PriceSignal>,
}

/// Statistics derived from a non-empty distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionStats {
    /// Number of signals
    pub count: usize,
    /// Weighted arithmetic mean
    pub mean: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Lower range bound (25th percentile, or min for thin samples)
    pub lower_quartile: f64,
    /// Upper range bound (75th percentile, or max for thin samples)
    pub upper_quartile: f64,
}

impl PriceDistribution {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signal
    pub fn push(&mut self, signal: PriceSignal) {
        self.signals.push(signal);
    }

    /// Number of signals
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether the distribution has no signals
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// All signals in insertion order
    pub fn signals(&self) -> &[PriceSignal] {
        &self.signals
    }

    /// Number of signals with the given provenance
    pub fn count_by(&self, provenance: Provenance) -> usize {
        self.signals
            .iter()
            .filter(|s| s.provenance == provenance)
            .count()
    }

    /// Number of distinct values in the sample
    pub fn distinct_values(&self) -> usize {
        let mut values: Vec<f64> = self.signals.iter().map(|s| s.value).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values.len()
    }

    /// Weighted nearest-rank quantile, without interpolation
    ///
    /// Returns the first value (in ascending order) whose cumulative weight
    /// exceeds `q` times the total weight. With unit weights this is the
    /// element at index `floor(n * q)` of the sorted sample.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        if self.signals.is_empty() {
            return None;
        }

        let mut sorted: Vec<&PriceSignal> = self.signals.iter().collect();
        sorted.sort_by(|a, b| a.value.total_cmp(&b.value));

        let total: f64 = sorted.iter().map(|s| s.weight).sum();
        let target = q.clamp(0.0, 1.0) * total;

        let mut cumulative = 0.0;
        for signal in &sorted {
            cumulative += signal.weight;
            if cumulative > target {
                return Some(signal.value);
            }
        }

        sorted.last().map(|s| s.value)
    }

    /// Compute statistics, using quartiles only when `count > robust_above`
    pub fn stats(&self, robust_above: usize) -> Option<DistributionStats> {
        if self.signals.is_empty() {
            return None;
        }

        let total_weight: f64 = self.signals.iter().map(|s| s.weight).sum();
        let weighted_sum: f64 = self.signals.iter().map(|s| s.value * s.weight).sum();
        let min = self
            .signals
            .iter()
            .map(|s| s.value)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .signals
            .iter()
            .map(|s| s.value)
            .fold(f64::NEG_INFINITY, f64::max);

        let (lower_quartile, upper_quartile) = if self.signals.len() > robust_above {
            (self.quantile(0.25)?, self.quantile(0.75)?)
        } else {
            (min, max)
        };

        Some(DistributionStats {
            count: self.signals.len(),
            mean: weighted_sum / total_weight,
            min,
            max,
            lower_quartile,
            upper_quartile,
        })
    }
}

impl FromIterator<PriceSignal> for PriceDistribution {
    fn from_iter<I: IntoIterator<Item = PriceSignal>>(iter: I) -> Self {
        Self {
            signals: iter.into_iter().collect(),
        }
    }
}

impl Extend<PriceSignal> for PriceDistribution {
    fn extend<I: IntoIterator<Item = PriceSignal>>(&mut self, iter: I) {
        self.signals.extend(iter);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: unit-weight quantiles match plain nearest-rank indexing
        #[test]
        fn test_unit_weight_quantile_matches_index(values in prop::collection::vec(0.0f64..1000.0, 1..60)) {
            let dist: PriceDistribution = values
                .iter()
                .map(|v| PriceSignal::new(*v, Provenance::WebSnippet).unwrap())
                .collect();

            let mut sorted = values.clone();
            sorted.sort_by(f64::total_cmp);
            let n = sorted.len();

            prop_assert_eq!(dist.quantile(0.25), Some(sorted[n / 4]));
            prop_assert_eq!(dist.quantile(0.75), Some(sorted[3 * n / 4]));
        }

        /// Property: range bounds stay inside [min, max] and are ordered
        #[test]
        fn test_bounds_are_ordered(values in prop::collection::vec(1.0f64..100000.0, 1..60)) {
            let dist: PriceDistribution = values
                .iter()
                .map(|v| PriceSignal::new(*v, Provenance::ForumSnippet).unwrap())
                .collect();
            let stats = dist.stats(DEFAULT_ROBUST_ABOVE).unwrap();

            prop_assert!(stats.min <= stats.lower_quartile);
            prop_assert!(stats.lower_quartile <= stats.upper_quartile);
            prop_assert!(stats.upper_quartile <= stats.max);
            prop_assert!(stats.min <= stats.mean + 1e-9 && stats.mean <= stats.max + 1e-9);
        }
    }
}
