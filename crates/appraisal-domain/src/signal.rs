//! Price signals - the atoms of a valuation

use std::fmt;

/// Where a price observation came from
///
/// Provenance drives source-trust weighting: completed sales are
/// authoritative, snippets scraped from search results are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// A completed sale reported by the structured marketplace source
    StructuredSold,

    /// A price mentioned in a general or marketplace-scoped search result
    WebSnippet,

    /// A price mentioned in a forum or collector community result
    ForumSnippet,
}

impl Provenance {
    /// Get the provenance name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::StructuredSold => "structured_sold",
            Provenance::WebSnippet => "web_snippet",
            Provenance::ForumSnippet => "forum_snippet",
        }
    }

    /// Parse a provenance from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "structured_sold" => Some(Provenance::StructuredSold),
            "web_snippet" => Some(Provenance::WebSnippet),
            "forum_snippet" => Some(Provenance::ForumSnippet),
            _ => None,
        }
    }

    /// Whether this provenance reflects a completed transaction
    pub fn is_structured(&self) -> bool {
        matches!(self, Provenance::StructuredSold)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One numeric price observation
///
/// Values are non-negative and finite; weights are positive and finite.
/// The plausibility window is enforced by the extractor before a signal
/// is ever built, so out-of-window values never reach this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSignal {
    /// Currency amount
    pub value: f64,

    /// Source of the observation
    pub provenance: Provenance,

    /// Relative weight in the distribution
    pub weight: f64,
}

impl PriceSignal {
    /// Create a unit-weight signal
    ///
    /// # Errors
    /// Returns error if the value is negative or not finite
    ///
    /// # Examples
    ///
    /// ```
    /// use appraisal_domain::{PriceSignal, Provenance};
    ///
    /// let signal = PriceSignal::new(42.5, Provenance::WebSnippet).unwrap();
    /// assert_eq!(signal.weight, 1.0);
    /// assert!(PriceSignal::new(-1.0, Provenance::WebSnippet).is_err());
    /// ```
    pub fn new(value: f64, provenance: Provenance) -> Result<Self, String> {
        if !value.is_finite() {
            return Err(format!("signal value {} is not finite", value));
        }
        if value < 0.0 {
            return Err(format!("signal value {} is negative", value));
        }

        Ok(Self {
            value,
            provenance,
            weight: 1.0,
        })
    }

    /// Replace the weight of this signal
    ///
    /// # Errors
    /// Returns error if the weight is not strictly positive and finite
    pub fn with_weight(mut self, weight: f64) -> Result<Self, String> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(format!("signal weight {} must be positive and finite", weight));
        }
        self.weight = weight;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_round_trip() {
        for provenance in [
            Provenance::StructuredSold,
            Provenance::WebSnippet,
            Provenance::ForumSnippet,
        ] {
            assert_eq!(Provenance::parse(provenance.as_str()), Some(provenance));
        }
        assert_eq!(Provenance::parse("rumour"), None);
    }

    #[test]
    fn test_only_sold_is_structured() {
        assert!(Provenance::StructuredSold.is_structured());
        assert!(!Provenance::WebSnippet.is_structured());
        assert!(!Provenance::ForumSnippet.is_structured());
    }

    #[test]
    fn test_signal_rejects_non_finite() {
        assert!(PriceSignal::new(f64::NAN, Provenance::WebSnippet).is_err());
        assert!(PriceSignal::new(f64::INFINITY, Provenance::WebSnippet).is_err());
    }

    #[test]
    fn test_signal_accepts_zero() {
        let signal = PriceSignal::new(0.0, Provenance::StructuredSold).unwrap();
        assert_eq!(signal.value, 0.0);
    }

    #[test]
    fn test_signal_weight_validation() {
        let signal = PriceSignal::new(10.0, Provenance::ForumSnippet).unwrap();
        assert!(signal.with_weight(0.0).is_err());
        assert!(signal.with_weight(-2.0).is_err());
        assert_eq!(signal.with_weight(2.5).unwrap().weight, 2.5);
    }
}
