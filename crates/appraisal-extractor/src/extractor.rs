//! Regex-backed price extractor

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{
    designated_line, first_amount, is_standalone, scan_amounts, verdict_tag_pattern,
};
use appraisal_domain::PriceExtractor;
use regex::Regex;
use tracing::debug;

/// Price extractor over monetary regex patterns
///
/// Free text goes through the plausibility window. The designated value
/// line of a narrative does not: whatever number parses there first is
/// the verdict.
#[derive(Debug, Clone)]
pub struct RegexPriceExtractor {
    config: ExtractorConfig,
    tag_pattern: Regex,
}

impl RegexPriceExtractor {
    /// Create an extractor from a validated configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let tag_pattern = verdict_tag_pattern(&config.verdict_tag)?;
        Ok(Self {
            config,
            tag_pattern,
        })
    }

    /// Create an extractor with the default configuration
    pub fn default_config() -> Result<Self, ExtractorError> {
        Self::new(ExtractorConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Value on the designated first line, unfiltered
    pub fn designated_value(&self, narrative: &str) -> Option<f64> {
        designated_line(narrative).and_then(first_amount)
    }

    /// Value on the last verdict tag line, unfiltered
    pub fn tagged_value(&self, narrative: &str) -> Option<f64> {
        self.tag_pattern
            .captures_iter(narrative)
            .filter_map(|caps| caps.name("rest").and_then(|rest| first_amount(rest.as_str())))
            .last()
    }
}

impl PriceExtractor for RegexPriceExtractor {
    fn extract(&self, text: &str) -> Vec<f64> {
        let found = scan_amounts(text);
        let total = found.len();

        let prices: Vec<f64> = found
            .into_iter()
            .filter(|m| {
                m.has_symbol || (!self.config.require_currency_symbol && is_standalone(text, m))
            })
            .map(|m| m.value)
            .filter(|v| self.config.is_plausible(*v))
            .collect();

        if total > prices.len() {
            debug!(
                "Discarded {} of {} numeric matches outside price patterns or window",
                total - prices.len(),
                total
            );
        }

        prices
    }

    fn extract_verdict(&self, narrative: &str) -> Option<f64> {
        self.designated_value(narrative)
            .or_else(|| self.tagged_value(narrative))
    }

    fn admits(&self, value: f64) -> bool {
        self.config.is_plausible(value)
    }

    /// Narrative prose without the verdict line and tag lines
    ///
    /// The first line is only dropped when it actually carried the verdict.
    fn analysis(&self, narrative: &str) -> String {
        let trimmed = narrative.trim();
        let skip = usize::from(self.designated_value(trimmed).is_some());

        trimmed
            .lines()
            .skip(skip)
            .filter(|line| !self.tag_pattern.is_match(line))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RegexPriceExtractor {
        RegexPriceExtractor::default_config().unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            max_plausible: 0.5,
            ..ExtractorConfig::default()
        };
        assert!(matches!(
            RegexPriceExtractor::new(config),
            Err(ExtractorError::Config(_))
        ));
    }

    #[test]
    fn test_extract_requires_symbol_by_default() {
        let prices = extractor().extract("Made in 1965, sold for $85 and $1,200.50");
        assert_eq!(prices, vec![85.0, 1200.5]);
    }

    #[test]
    fn test_extract_applies_window() {
        let prices = extractor().extract("$0.50 shipping, $250,000 appraisal, $99");
        assert_eq!(prices, vec![99.0]);
    }

    #[test]
    fn test_lenient_accepts_bare_numbers() {
        let lenient = RegexPriceExtractor::new(ExtractorConfig::lenient()).unwrap();
        let prices = lenient.extract("Asking 45 or best offer, 20% off, item #A7");
        assert_eq!(prices, vec![45.0]);
    }

    #[test]
    fn test_verdict_on_first_line_is_unfiltered() {
        let e = extractor();
        assert_eq!(e.extract_verdict("150.00\nA nice vase."), Some(150.0));
        assert_eq!(e.extract_verdict("0.25\nA common coin."), Some(0.25));
        assert_eq!(e.extract_verdict("250000\nA painting."), Some(250_000.0));
    }

    #[test]
    fn test_verdict_falls_back_to_tag() {
        let e = extractor();
        let narrative = "This looks like a Fenton lamp.\nMarket is soft.\nESTIMATED_VALUE: $95";
        assert_eq!(e.designated_value(narrative), None);
        assert_eq!(e.extract_verdict(narrative), Some(95.0));
    }

    #[test]
    fn test_no_verdict_is_none() {
        assert_eq!(extractor().extract_verdict("I cannot value this item."), None);
        assert_eq!(extractor().extract_verdict(""), None);
    }

    #[test]
    fn test_analysis_strips_verdict_and_tag() {
        let e = extractor();
        let narrative = "120\nSigned piece.\nGood condition.\nESTIMATED_VALUE: 120";
        assert_eq!(e.analysis(narrative), "Signed piece.\nGood condition.");
    }

    #[test]
    fn test_analysis_keeps_prose_first_line() {
        let e = extractor();
        assert_eq!(e.analysis("Hard to say.\nMaybe more."), "Hard to say.\nMaybe more.");
    }
}
