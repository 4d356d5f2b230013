//! Listing recommendations derived from a summary

use appraisal_domain::{
    round_cents, ConfidenceTier, PriceGuide, Recommendation, ValuationSummary,
};

/// Sample sizes above this earn a "strong market data" note
pub const STRONG_DATA_ABOVE: usize = 20;

const HIGH_LIST_MARKUP: f64 = 1.10;
const HIGH_ACCEPT_FACTOR: f64 = 0.90;
const UNCERTAIN_LIST_MARKUP: f64 = 1.20;
const UNCERTAIN_ACCEPT_FACTOR: f64 = 1.10;

/// Builds a [`Recommendation`] from a summary and the item's wording
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Create a recommendation engine
    pub fn new() -> Self {
        Self
    }

    /// Conservative guidance used whenever the summary carries no range
    pub fn fallback() -> Recommendation {
        Recommendation {
            list_price: PriceGuide::Range {
                low: 50.0,
                high: 75.0,
            },
            accept_above: PriceGuide::Amount(40.0),
            quick_sale_price: None,
            strategy: "Start with moderate pricing due to limited market data".to_string(),
            factors: vec![
                "Limited comparable sales data".to_string(),
                "Price based on general collectibles market".to_string(),
            ],
        }
    }

    /// Recommend listing prices for an item
    pub fn recommend(
        &self,
        summary: &ValuationSummary,
        title: &str,
        description: Option<&str>,
    ) -> Recommendation {
        let (Some((lower, upper)), Some(point), true) =
            (summary.range, summary.point_estimate, summary.is_success())
        else {
            return Self::fallback();
        };

        let (list_price, accept_above, strategy) = if summary.confidence == ConfidenceTier::High {
            (
                upper * HIGH_LIST_MARKUP,
                point * HIGH_ACCEPT_FACTOR,
                "Price competitively based on strong market data",
            )
        } else {
            (
                upper * UNCERTAIN_LIST_MARKUP,
                lower * UNCERTAIN_ACCEPT_FACTOR,
                "Allow room for negotiation due to variable market prices",
            )
        };

        Recommendation {
            list_price: PriceGuide::Amount(round_cents(list_price)),
            accept_above: PriceGuide::Amount(round_cents(accept_above)),
            quick_sale_price: Some(PriceGuide::Amount(round_cents(lower))),
            strategy: strategy.to_string(),
            factors: Self::factors(summary, lower, upper, title, description),
        }
    }

    fn factors(
        summary: &ValuationSummary,
        lower: f64,
        upper: f64,
        title: &str,
        description: Option<&str>,
    ) -> Vec<String> {
        let mut factors = Vec::new();

        let wording = format!("{} {}", title, description.unwrap_or_default()).to_lowercase();
        if wording.contains("rare") || wording.contains("limited") {
            factors.push("Item appears to be rare/limited edition".to_string());
        }

        // Replicated sold averages are not independent observations
        if summary.distinct_values > STRONG_DATA_ABOVE {
            factors.push(format!(
                "Strong market data from {} sales",
                summary.distinct_values
            ));
        }

        if upper > 2.0 * lower {
            factors.push("High price variance - condition is crucial".to_string());
        }

        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appraisal_domain::ValuationStatus;

    fn summary(confidence: ConfidenceTier, range: (f64, f64), point: f64) -> ValuationSummary {
        ValuationSummary {
            status: ValuationStatus::Success,
            range: Some(range),
            point_estimate: Some(point),
            confidence,
            sample_size: 8,
            distinct_values: 8,
            stats: None,
            insights: Vec::new(),
        }
    }

    #[test]
    fn test_no_data_uses_fallback() {
        let empty = ValuationSummary::empty(ValuationStatus::NoData, Vec::new());
        let rec = RecommendationEngine::new().recommend(&empty, "Lamp", None);
        assert_eq!(rec.list_price.to_string(), "$50 - $75");
        assert_eq!(rec.accept_above.to_string(), "$40");
        assert!(rec.quick_sale_price.is_none());
        assert_eq!(rec, RecommendationEngine::fallback());
    }

    #[test]
    fn test_limited_data_uses_fallback() {
        let limited = ValuationSummary::empty(ValuationStatus::LimitedData, Vec::new());
        let rec = RecommendationEngine::new().recommend(&limited, "Lamp", None);
        assert_eq!(rec, RecommendationEngine::fallback());
    }

    #[test]
    fn test_high_confidence_pricing() {
        let rec = RecommendationEngine::new().recommend(
            &summary(ConfidenceTier::High, (100.0, 150.0), 120.0),
            "Lamp",
            None,
        );
        assert_eq!(rec.list_price, PriceGuide::Amount(165.0));
        assert_eq!(rec.accept_above, PriceGuide::Amount(108.0));
        assert_eq!(rec.quick_sale_price, Some(PriceGuide::Amount(100.0)));
        assert_eq!(rec.strategy, "Price competitively based on strong market data");
    }

    #[test]
    fn test_uncertain_pricing() {
        for tier in [ConfidenceTier::Medium, ConfidenceTier::Low] {
            let rec = RecommendationEngine::new().recommend(
                &summary(tier, (100.0, 150.0), 120.0),
                "Lamp",
                None,
            );
            assert_eq!(rec.list_price, PriceGuide::Amount(180.0));
            assert_eq!(rec.accept_above, PriceGuide::Amount(110.0));
            assert_eq!(rec.quick_sale_price, Some(PriceGuide::Amount(100.0)));
        }
    }

    #[test]
    fn test_factors() {
        let mut s = summary(ConfidenceTier::High, (40.0, 100.0), 70.0);
        s.distinct_values = 21;
        let rec = RecommendationEngine::new().recommend(&s, "Limited Edition print", None);
        assert_eq!(
            rec.factors,
            vec![
                "Item appears to be rare/limited edition".to_string(),
                "Strong market data from 21 sales".to_string(),
                "High price variance - condition is crucial".to_string(),
            ]
        );
    }

    #[test]
    fn test_rarity_from_description() {
        let rec = RecommendationEngine::new().recommend(
            &summary(ConfidenceTier::Low, (10.0, 12.0), 11.0),
            "Coin",
            Some("A RARE mint error"),
        );
        assert_eq!(rec.factors, vec!["Item appears to be rare/limited edition".to_string()]);
    }
}
