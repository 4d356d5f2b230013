//! End-to-end valuation of one item

use crate::aggregator::SourceAggregator;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::recommend::RecommendationEngine;
use crate::report::{compose_narrative, market_context};
use crate::summarizer::StatisticalSummarizer;
use appraisal_domain::{
    NarrativeGenerator, NarrativeRequest, PriceExtractor, Recommendation, SoldPriceSource,
    TextSearchSource, ValuationSummary,
};
use futures::FutureExt;
use std::fmt::{self, Display};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// One item to value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValuationRequest {
    /// Auction title
    pub title: String,

    /// Image references passed through to the narrative generator
    pub image_refs: Vec<String>,

    /// Optional item description
    pub description: Option<String>,

    /// Current bidding price, if known
    pub current_price: Option<f64>,
}

impl ValuationRequest {
    /// Request with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Check the request before any source is queried
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.title.trim().is_empty() {
            return Err(EngineError::InvalidRequest("title cannot be empty".to_string()));
        }
        if let Some(price) = self.current_price {
            if !price.is_finite() || price < 0.0 {
                return Err(EngineError::InvalidRequest(format!(
                    "current price must be a non-negative number, got {}",
                    price
                )));
            }
        }
        Ok(())
    }
}

/// Where the final estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The narrative's own verdict
    Narrative,
    /// The market summary's point estimate
    MarketData,
    /// The configured fallback value
    Default,
}

impl ValueSource {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Narrative => "narrative",
            ValueSource::MarketData => "market_data",
            ValueSource::Default => "default",
        }
    }
}

impl Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of valuing one item
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// Final estimate
    pub estimated_value: f64,

    /// Which tier of the fallback chain produced the estimate
    pub value_source: ValueSource,

    /// Analysis text followed by the market and recommendation blocks
    pub narrative: String,

    /// Statistical summary
    pub summary: ValuationSummary,

    /// Listing guidance
    pub recommendation: Recommendation,
}

/// Pick the final estimate: narrative verdict, then point estimate, then fallback
///
/// # Examples
///
/// ```
/// use appraisal_engine::{reconcile, ValueSource};
///
/// assert_eq!(reconcile(Some(150.0), Some(90.0), 25.0), (150.0, ValueSource::Narrative));
/// assert_eq!(reconcile(None, Some(90.0), 25.0), (90.0, ValueSource::MarketData));
/// assert_eq!(reconcile(None, None, 25.0), (25.0, ValueSource::Default));
/// ```
pub fn reconcile(verdict: Option<f64>, point_estimate: Option<f64>, fallback: f64) -> (f64, ValueSource) {
    match (verdict, point_estimate) {
        (Some(value), _) => (value, ValueSource::Narrative),
        (None, Some(value)) => (value, ValueSource::MarketData),
        (None, None) => (fallback, ValueSource::Default),
    }
}

/// Values items end to end
///
/// Market research, summary and recommendation never depend on the
/// narrative call. Only an unusable request fails; every collaborator
/// failure is absorbed.
pub struct ValuationOrchestrator<S, T, N, X> {
    aggregator: SourceAggregator<S, T>,
    summarizer: StatisticalSummarizer<X>,
    recommender: RecommendationEngine,
    extractor: Arc<X>,
    narrator: Option<Arc<N>>,
    config: EngineConfig,
}

impl<S, T, N, X> ValuationOrchestrator<S, T, N, X>
where
    S: SoldPriceSource + 'static,
    S::Error: Display,
    T: TextSearchSource + 'static,
    T::Error: Display,
    N: NarrativeGenerator + 'static,
    N::Error: Display,
    X: PriceExtractor + Send + Sync + 'static,
{
    /// Create an orchestrator without a narrative generator
    pub fn new(sold_source: S, search_source: T, extractor: X, config: EngineConfig) -> Result<Self, EngineError> {
        Self::from_shared(
            Arc::new(sold_source),
            Arc::new(search_source),
            Arc::new(extractor),
            config,
        )
    }

    /// Create an orchestrator over shared collaborators
    pub fn from_shared(
        sold_source: Arc<S>,
        search_source: Arc<T>,
        extractor: Arc<X>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;

        Ok(Self {
            aggregator: SourceAggregator::from_shared(sold_source, search_source, config.clone()),
            summarizer: StatisticalSummarizer::from_shared(Arc::clone(&extractor), config.clone()),
            recommender: RecommendationEngine::new(),
            extractor,
            narrator: None,
            config,
        })
    }

    /// Attach a narrative generator
    pub fn with_narrator(mut self, narrator: N) -> Self {
        self.narrator = Some(Arc::new(narrator));
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Market research only: summary and recommendation
    pub async fn research(&self, request: &ValuationRequest) -> (ValuationSummary, Recommendation) {
        let description = request.description.as_deref();
        let aggregate = self.aggregator.aggregate(&request.title, description).await;
        let summary = self
            .summarizer
            .summarize(&aggregate.structured, &aggregate.unstructured);
        let recommendation = self
            .recommender
            .recommend(&summary, &request.title, description);
        (summary, recommendation)
    }

    /// Value one item
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] when the title is blank or
    /// the current price is not a usable number.
    pub async fn valuate(&self, request: &ValuationRequest) -> Result<Valuation, EngineError> {
        request.validate()?;
        info!(title = %request.title, "Valuating item");

        let (summary, recommendation) = self.research(request).await;
        let narrative = self.narrate(request, &summary).await;

        let verdict = narrative
            .as_deref()
            .and_then(|text| self.extractor.extract_verdict(text));
        if narrative.is_some() && verdict.is_none() {
            warn!(title = %request.title, "Narrative carried no parseable verdict");
        }

        let (estimated_value, value_source) =
            reconcile(verdict, summary.point_estimate, self.config.fallback_value);

        let analysis = narrative.as_deref().map(|text| self.extractor.analysis(text));
        let narrative = compose_narrative(analysis.as_deref(), &summary, &recommendation);

        info!(
            title = %request.title,
            estimated_value,
            value_source = %value_source,
            status = %summary.status,
            confidence = %summary.confidence,
            "Valuation complete"
        );

        Ok(Valuation {
            estimated_value,
            value_source,
            narrative,
            summary,
            recommendation,
        })
    }

    /// Value one item within the configured per-item time budget
    pub async fn valuate_with_timeout(&self, request: &ValuationRequest) -> Result<Valuation, EngineError> {
        timeout(self.config.item_timeout(), self.valuate(request))
            .await
            .map_err(|_| EngineError::Timeout(self.config.item_timeout_secs))?
    }

    async fn narrate(&self, request: &ValuationRequest, summary: &ValuationSummary) -> Option<String> {
        let Some(narrator) = &self.narrator else {
            debug!("No narrative generator configured");
            return None;
        };

        let narrative_request = NarrativeRequest {
            title: request.title.clone(),
            image_refs: request.image_refs.clone(),
            description: request.description.clone(),
            market_context: market_context(summary),
            current_price: request.current_price,
        };

        // The call is dropped, and with it any request in flight, on timeout
        let call = AssertUnwindSafe(narrator.generate(&narrative_request)).catch_unwind();
        match timeout(self.config.narrative_timeout(), call).await {
            Ok(Ok(Ok(text))) => Some(text),
            Ok(Ok(Err(e))) => {
                warn!(title = %request.title, error = %e, "Narrative generation failed");
                None
            }
            Ok(Err(_)) => {
                warn!(title = %request.title, "Narrative generator panicked");
                None
            }
            Err(_) => {
                warn!(
                    title = %request.title,
                    timeout_secs = self.config.narrative_timeout_secs,
                    "Narrative generation timed out"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appraisal_extractor::RegexPriceExtractor;
    use appraisal_llm::MockNarrator;
    use appraisal_sources::{MockSearch, MockSoldSource};

    type MockOrchestrator =
        ValuationOrchestrator<MockSoldSource, MockSearch, MockNarrator, RegexPriceExtractor>;

    fn orchestrator() -> MockOrchestrator {
        ValuationOrchestrator::new(
            MockSoldSource::empty(),
            MockSearch::new(),
            RegexPriceExtractor::default_config().unwrap(),
            EngineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_request_validation() {
        assert!(ValuationRequest::new("Lamp").validate().is_ok());
        assert!(matches!(
            ValuationRequest::new("   ").validate(),
            Err(EngineError::InvalidRequest(_))
        ));
        let negative = ValuationRequest {
            current_price: Some(-3.0),
            ..ValuationRequest::new("Lamp")
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result: Result<MockOrchestrator, _> = ValuationOrchestrator::new(
            MockSoldSource::empty(),
            MockSearch::new(),
            RegexPriceExtractor::default_config().unwrap(),
            EngineConfig {
                item_timeout_secs: 0,
                ..EngineConfig::default()
            },
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[tokio::test]
    async fn test_blank_title_is_hard_failure() {
        let result = orchestrator().valuate(&ValuationRequest::new("")).await;
        assert!(matches!(result, Err(EngineError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_without_narrator_uses_fallback_chain() {
        let valuation = orchestrator()
            .valuate(&ValuationRequest::new("Mystery box"))
            .await
            .unwrap();
        assert_eq!(valuation.estimated_value, 25.0);
        assert_eq!(valuation.value_source, ValueSource::Default);
        assert!(valuation.narrative.contains("Analysis unavailable"));
    }

    #[tokio::test]
    async fn test_narrator_receives_context_and_anchor() {
        let narrator = MockNarrator::new("75\nLooks common.");
        let orchestrator = orchestrator().with_narrator(narrator.clone());

        let request = ValuationRequest {
            current_price: Some(12.5),
            image_refs: vec!["https://img/1.jpg".to_string()],
            ..ValuationRequest::new("Tin robot")
        };
        let valuation = orchestrator.valuate(&request).await.unwrap();

        assert_eq!(valuation.estimated_value, 75.0);
        assert!(valuation.narrative.starts_with("Looks common."));

        let seen = narrator.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].current_price, Some(12.5));
        assert_eq!(seen[0].image_refs, vec!["https://img/1.jpg".to_string()]);
        assert!(seen[0].market_context.contains("Confidence: none (0 data points)"));
    }

    #[tokio::test]
    async fn test_slow_narrator_times_out() {
        let config = EngineConfig {
            narrative_timeout_secs: 1,
            ..EngineConfig::default()
        };
        let orchestrator: MockOrchestrator = ValuationOrchestrator::new(
            MockSoldSource::empty(),
            MockSearch::new(),
            RegexPriceExtractor::default_config().unwrap(),
            config,
        )
        .unwrap()
        .with_narrator(MockNarrator::new("999").with_delay(std::time::Duration::from_secs(3)));

        let valuation = orchestrator
            .valuate(&ValuationRequest::new("Slow item"))
            .await
            .unwrap();
        assert_eq!(valuation.value_source, ValueSource::Default);
        assert!(valuation.narrative.contains("Analysis unavailable"));
    }

    #[tokio::test]
    async fn test_item_timeout() {
        let config = EngineConfig {
            item_timeout_secs: 1,
            narrative_timeout_secs: 5,
            ..EngineConfig::default()
        };
        let orchestrator: MockOrchestrator = ValuationOrchestrator::new(
            MockSoldSource::empty(),
            MockSearch::new(),
            RegexPriceExtractor::default_config().unwrap(),
            config,
        )
        .unwrap()
        .with_narrator(MockNarrator::new("999").with_delay(std::time::Duration::from_secs(3)));

        let result = orchestrator
            .valuate_with_timeout(&ValuationRequest::new("Slow item"))
            .await;
        assert_eq!(result, Err(EngineError::Timeout(1)));
    }
}
