//! Text blocks appended to every narrative

use appraisal_domain::{format_usd, Recommendation, ValuationSummary};

/// Heading of the market research block
pub const MARKET_HEADING: &str = "--- Market Research ---";

/// Heading of the pricing recommendation block
pub const RECOMMENDATION_HEADING: &str = "--- Pricing Recommendation ---";

/// Shown in place of the model's prose when it produced none
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable: the reasoning model did not \
return a narrative. The estimate is based on market research only.";

/// Market summary as handed to the narrative generator
pub fn market_context(summary: &ValuationSummary) -> String {
    let mut lines = summary.insights.clone();
    lines.push(format!("Estimated range: {}", summary.range_label()));
    if let Some(point) = summary.point_estimate {
        lines.push(format!("Average of weighted sample: {}", format_usd(point, 2)));
    }
    lines.push(format!(
        "Confidence: {} ({} data points)",
        summary.confidence, summary.sample_size
    ));
    lines.join("\n")
}

/// The market research block
pub fn market_section(summary: &ValuationSummary) -> String {
    format!("{}\n{}", MARKET_HEADING, market_context(summary))
}

/// The pricing recommendation block
pub fn recommendation_section(recommendation: &Recommendation) -> String {
    let mut lines = vec![
        RECOMMENDATION_HEADING.to_string(),
        format!("List price: {}", recommendation.list_price),
        format!("Accept offers above: {}", recommendation.accept_above),
    ];
    if let Some(quick) = &recommendation.quick_sale_price {
        lines.push(format!("Quick sale price: {}", quick));
    }
    lines.push(format!("Strategy: {}", recommendation.strategy));
    if !recommendation.factors.is_empty() {
        lines.push("Factors:".to_string());
        lines.extend(recommendation.factors.iter().map(|f| format!("- {}", f)));
    }
    lines.join("\n")
}

/// Final narrative: the model's prose followed by both blocks
pub fn compose_narrative(
    analysis: Option<&str>,
    summary: &ValuationSummary,
    recommendation: &Recommendation,
) -> String {
    let prose = match analysis.map(str::trim) {
        Some("") => "No written analysis was provided.",
        Some(text) => text,
        None => ANALYSIS_UNAVAILABLE,
    };

    format!(
        "{}\n\n{}\n\n{}",
        prose,
        market_section(summary),
        recommendation_section(recommendation)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::RecommendationEngine;
    use appraisal_domain::{ConfidenceTier, PriceGuide, ValuationStatus};

    fn success() -> ValuationSummary {
        ValuationSummary {
            status: ValuationStatus::Success,
            range: Some((100.0, 150.0)),
            point_estimate: Some(120.0),
            confidence: ConfidenceTier::High,
            sample_size: 24,
            distinct_values: 9,
            stats: None,
            insights: vec!["Found 12 sold listings".to_string()],
        }
    }

    #[test]
    fn test_market_context() {
        let context = market_context(&success());
        assert_eq!(
            context,
            "Found 12 sold listings\n\
             Estimated range: $100 - $150\n\
             Average of weighted sample: $120.00\n\
             Confidence: high (24 data points)"
        );
    }

    #[test]
    fn test_recommendation_section() {
        let rec = Recommendation {
            list_price: PriceGuide::Amount(165.0),
            accept_above: PriceGuide::Amount(108.0),
            quick_sale_price: Some(PriceGuide::Amount(100.0)),
            strategy: "Price competitively".to_string(),
            factors: vec!["High price variance".to_string()],
        };
        assert_eq!(
            recommendation_section(&rec),
            "--- Pricing Recommendation ---\n\
             List price: $165\n\
             Accept offers above: $108\n\
             Quick sale price: $100\n\
             Strategy: Price competitively\n\
             Factors:\n\
             - High price variance"
        );
    }

    #[test]
    fn test_compose_without_analysis() {
        let empty = ValuationSummary::empty(ValuationStatus::NoData, Vec::new());
        let narrative = compose_narrative(None, &empty, &RecommendationEngine::fallback());

        assert!(narrative.starts_with(ANALYSIS_UNAVAILABLE));
        assert!(narrative.contains("Estimated range: Unable to determine"));
        assert!(narrative.contains("List price: $50 - $75"));
        assert!(!narrative.contains("Quick sale price"));
    }

    #[test]
    fn test_compose_with_analysis() {
        let narrative = compose_narrative(
            Some("  A signed first edition.  "),
            &success(),
            &RecommendationEngine::fallback(),
        );
        assert!(narrative.starts_with("A signed first edition.\n\n--- Market Research ---"));
    }

    #[test]
    fn test_compose_with_blank_analysis() {
        let narrative = compose_narrative(Some(""), &success(), &RecommendationEngine::fallback());
        assert!(narrative.starts_with("No written analysis was provided."));
    }
}
