//! Confidence tiers derived from sample size

use std::fmt;

/// Qualitative confidence bucket
///
/// A pure function of the combined sample size; nothing else feeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceTier {
    /// No usable observations
    None,
    /// 1..=5 observations (default thresholds)
    Low,
    /// 6..=10 observations (default thresholds)
    Medium,
    /// More than 10 observations (default thresholds)
    High,
}

impl ConfidenceTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::None => "none",
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(ConfidenceTier::None),
            "low" => Some(ConfidenceTier::Low),
            "medium" => Some(ConfidenceTier::Medium),
            "high" => Some(ConfidenceTier::High),
            _ => None,
        }
    }

    /// Classify a sample size with the default thresholds
    ///
    /// # Examples
    ///
    /// ```
    /// use appraisal_domain::ConfidenceTier;
    ///
    /// assert_eq!(ConfidenceTier::from_sample_size(0), ConfidenceTier::None);
    /// assert_eq!(ConfidenceTier::from_sample_size(5), ConfidenceTier::Low);
    /// assert_eq!(ConfidenceTier::from_sample_size(10), ConfidenceTier::Medium);
    /// assert_eq!(ConfidenceTier::from_sample_size(11), ConfidenceTier::High);
    /// ```
    pub fn from_sample_size(sample_size: usize) -> Self {
        ConfidenceThresholds::default().classify(sample_size)
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sample-size thresholds for the confidence tiers
///
/// Sizes strictly above `high_above` are HIGH, strictly above
/// `medium_above` are MEDIUM, any other non-zero size is LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceThresholds {
    /// HIGH when sample size exceeds this
    pub high_above: usize,
    /// MEDIUM when sample size exceeds this
    pub medium_above: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high_above: 10,
            medium_above: 5,
        }
    }
}

impl ConfidenceThresholds {
    /// Classify a sample size
    pub fn classify(&self, sample_size: usize) -> ConfidenceTier {
        if sample_size == 0 {
            ConfidenceTier::None
        } else if sample_size > self.high_above {
            ConfidenceTier::High
        } else if sample_size > self.medium_above {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Validate the thresholds
    pub fn validate(&self) -> Result<(), String> {
        if self.medium_above >= self.high_above {
            return Err(format!(
                "medium_above ({}) must be below high_above ({})",
                self.medium_above, self.high_above
            ));
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: default classification matches the documented intervals
        #[test]
        fn test_classification_intervals(size in 0usize..10_000) {
            let tier = ConfidenceTier::from_sample_size(size);
            let expected = match size {
                0 => ConfidenceTier::None,
                1..=5 => ConfidenceTier::Low,
                6..=10 => ConfidenceTier::Medium,
                _ => ConfidenceTier::High,
            };
            prop_assert_eq!(tier, expected);
        }

        /// Property: tiers never decrease as the sample grows
        #[test]
        fn test_classification_is_monotone(a in 0usize..500, b in 0usize..500) {
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                ConfidenceTier::from_sample_size(small) <= ConfidenceTier::from_sample_size(large)
            );
        }
    }
}
