//! Integration tests for the price extractor

#[cfg(test)]
mod tests {
    use crate::{parse_listing_price, ExtractorConfig, RegexPriceExtractor};
    use appraisal_domain::PriceExtractor;

    #[test]
    fn test_search_snippet_flow() {
        let extractor = RegexPriceExtractor::default_config().unwrap();
        let snippet = "Vintage Pyrex 1960s bowl set\nSold 3 days ago for $45.00. \
                       Similar sets go for $30-$60 depending on condition.";

        let prices = extractor.extract(snippet);
        assert_eq!(prices, vec![45.0, 30.0, 60.0]);
    }

    #[test]
    fn test_custom_tag_and_window() {
        let config = ExtractorConfig {
            min_plausible: 10.0,
            max_plausible: 500.0,
            verdict_tag: "VALUE".to_string(),
            ..ExtractorConfig::default()
        };
        let extractor = RegexPriceExtractor::new(config).unwrap();

        assert_eq!(extractor.extract("$5 or $50 or $5,000"), vec![50.0]);
        assert_eq!(
            extractor.extract_verdict("Can't decide on line one.\nVALUE = 42"),
            Some(42.0)
        );
        assert_eq!(
            extractor.extract_verdict("No number.\nESTIMATED_VALUE: 42"),
            None
        );
    }

    #[test]
    fn test_first_line_beats_tag() {
        let extractor = RegexPriceExtractor::default_config().unwrap();
        let narrative = "$210\nThe tag disagrees.\nESTIMATED_VALUE: 180";
        assert_eq!(extractor.extract_verdict(narrative), Some(210.0));
    }

    #[test]
    fn test_listing_prices() {
        assert_eq!(parse_listing_price("$12.50 (3 bids)"), Some(12.5));
        assert_eq!(parse_listing_price("$2,100.00"), Some(2100.0));
    }
}

#[cfg(test)]
mod proptests {
    use crate::{ExtractorConfig, RegexPriceExtractor};
    use appraisal_domain::PriceExtractor;
    use proptest::prelude::*;

    proptest! {
        /// Property: free-text extraction never leaves the plausibility window
        #[test]
        fn test_extracted_values_within_window(text in "[ -~\n]{0,200}") {
            for config in [ExtractorConfig::default(), ExtractorConfig::lenient()] {
                let extractor = RegexPriceExtractor::new(config).unwrap();
                for value in extractor.extract(&text) {
                    prop_assert!((1.0..=100_000.0).contains(&value));
                }
            }
        }

        /// Property: dollar amounts embedded in prose are found when plausible
        #[test]
        fn test_embedded_amount_found(cents in 100u64..10_000_000u64, prefix in "[a-z ]{0,20}") {
            let value = cents as f64 / 100.0;
            let text = format!("{} ${:.2} obo", prefix, value);
            let extractor = RegexPriceExtractor::default_config().unwrap();
            prop_assert_eq!(extractor.extract(&text), vec![value]);
        }

        /// Property: the designated line is read without any window
        #[test]
        fn test_designated_line_unfiltered(whole in 0u64..10_000_000u64, body in "[a-zA-Z .]{0,80}") {
            let narrative = format!("{}\n{}", whole, body);
            let extractor = RegexPriceExtractor::default_config().unwrap();
            prop_assert_eq!(extractor.extract_verdict(&narrative), Some(whole as f64));
        }
    }
}
