//! Statistical summary over structured and unstructured signals

use crate::config::EngineConfig;
use appraisal_domain::{
    round_cents, PriceDistribution, PriceExtractor, PriceSignal, Provenance, SoldStats,
    SourceRecord, TaggedRecord, ValuationStatus, ValuationSummary, RECENT_SALES_LIMIT,
};
use std::sync::Arc;
use tracing::debug;

/// Turns aggregated source data into a [`ValuationSummary`]
///
/// Pure: the same inputs always give the same summary.
pub struct StatisticalSummarizer<X> {
    extractor: Arc<X>,
    config: EngineConfig,
}

/// Signals plus the bookkeeping the insights need
struct Collected {
    distribution: PriceDistribution,
    mentions: usize,
    search_results: usize,
}

impl<X: PriceExtractor> StatisticalSummarizer<X> {
    /// Create a summarizer
    pub fn new(extractor: X, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(extractor), config)
    }

    /// Create a summarizer sharing an extractor
    pub fn from_shared(extractor: Arc<X>, config: EngineConfig) -> Self {
        Self { extractor, config }
    }

    /// Number of replicas of the sold average added to the sample
    pub fn structured_replicas(&self, structured: &SoldStats) -> usize {
        if !structured.has_sales() {
            return 0;
        }
        structured
            .count
            .saturating_mul(self.config.structured_weight_per_sale)
            .min(self.config.structured_weight_cap)
    }

    /// The combined, weighted signal sample
    pub fn signals(&self, structured: &SoldStats, unstructured: &[TaggedRecord]) -> PriceDistribution {
        self.collect(structured, unstructured).distribution
    }

    fn admitted(&self, value: f64, provenance: Provenance) -> Option<PriceSignal> {
        if !self.extractor.admits(value) {
            return None;
        }
        PriceSignal::new(value, provenance).ok()
    }

    fn collect(&self, structured: &SoldStats, unstructured: &[TaggedRecord]) -> Collected {
        let mut distribution: PriceDistribution = structured
            .sample
            .iter()
            .take(RECENT_SALES_LIMIT)
            .filter_map(|item| self.admitted(item.price, Provenance::StructuredSold))
            .collect();

        let mut mentions = 0;
        let mut search_results = 0;
        for tagged in unstructured {
            match &tagged.record {
                SourceRecord::Search(_) => {
                    search_results += 1;
                    let text = tagged.record.searchable_text();
                    for value in self.extractor.extract(&text) {
                        if let Some(signal) = self.admitted(value, tagged.provenance) {
                            distribution.push(signal);
                            mentions += 1;
                        }
                    }
                }
                SourceRecord::Sold(item) => {
                    distribution.extend(self.admitted(item.price, tagged.provenance));
                }
            }
        }

        if let Some(average) = self.admitted(structured.average, Provenance::StructuredSold) {
            let replicas = self.structured_replicas(structured);
            distribution.extend(std::iter::repeat(average).take(replicas));
        }

        Collected {
            distribution,
            mentions,
            search_results,
        }
    }

    /// Summarize one item's market data
    pub fn summarize(&self, structured: &SoldStats, unstructured: &[TaggedRecord]) -> ValuationSummary {
        let collected = self.collect(structured, unstructured);
        let distribution = collected.distribution;

        let mut insights = Vec::new();
        if structured.has_sales() {
            insights.push(format!("Found {} sold listings", structured.count));
            insights.push(format!("Sold price range: {}", structured.price_range_label()));
        }
        insights.push(format!(
            "Extracted {} price mentions from {} search results",
            collected.mentions, collected.search_results
        ));

        let Some(stats) = distribution.stats(self.config.quartile_min_sample) else {
            let status = if structured.has_sales() {
                insights.push("Sold listings were reported but none had a usable price".to_string());
                ValuationStatus::LimitedData
            } else {
                ValuationStatus::NoData
            };
            debug!(status = %status, "No usable price signals");
            return ValuationSummary::empty(status, insights);
        };

        let sample_size = distribution.len();
        let summary = ValuationSummary {
            status: ValuationStatus::Success,
            range: Some((stats.lower_quartile, stats.upper_quartile)),
            point_estimate: Some(round_cents(stats.mean)),
            confidence: self.config.confidence_thresholds().classify(sample_size),
            sample_size,
            distinct_values: distribution.distinct_values(),
            stats: Some(stats),
            insights,
        };

        debug!(
            sample_size,
            structured = distribution.count_by(Provenance::StructuredSold),
            web = distribution.count_by(Provenance::WebSnippet),
            forum = distribution.count_by(Provenance::ForumSnippet),
            confidence = %summary.confidence,
            "Summarized price signals"
        );
        summary
    }
}
