//! Appraisal Valuation Engine
//!
//! Aggregates market data for an auction item, summarizes it statistically,
//! derives listing guidance and reconciles it with a reasoning model's
//! narrative verdict.
//!
//! # Architecture
//!
//! ```text
//! title ─▶ SourceAggregator ─▶ StatisticalSummarizer ─▶ RecommendationEngine
//!              │ sold stats        │ ValuationSummary        │ Recommendation
//!              │ search fan-out    ▼                         ▼
//!              └──────────▶ ValuationOrchestrator ◀── NarrativeGenerator
//!                                  │
//!                                  ▼
//!                    (estimated_value, narrative)
//! ```
//!
//! Collaborators are injected through the traits in `appraisal-domain`.
//! Their failures are absorbed and logged; the orchestrator always returns
//! a value and a narrative for a well-formed request.
//!
//! # Example Usage
//!
//! ```no_run
//! use appraisal_engine::{EngineConfig, ValuationOrchestrator, ValuationRequest};
//! use appraisal_extractor::RegexPriceExtractor;
//! use appraisal_llm::MockNarrator;
//! use appraisal_sources::{MockSearch, MockSoldSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = ValuationOrchestrator::new(
//!     MockSoldSource::empty(),
//!     MockSearch::new(),
//!     RegexPriceExtractor::default_config()?,
//!     EngineConfig::default(),
//! )?
//! .with_narrator(MockNarrator::new("85.00\nA common pattern."));
//!
//! let valuation = orchestrator
//!     .valuate(&ValuationRequest::new("Pyrex Butterprint bowl"))
//!     .await?;
//! println!("{} ({})", valuation.estimated_value, valuation.value_source);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod batch;
mod config;
mod error;
mod metrics;
mod orchestrator;
mod query;
mod recommend;
mod report;
mod summarizer;

pub use aggregator::{AggregateResult, SourceAggregator};
pub use batch::{BatchReport, BatchValuator};
pub use config::EngineConfig;
pub use error::EngineError;
pub use metrics::BatchMetrics;
pub use orchestrator::{
    reconcile, Valuation, ValuationOrchestrator, ValuationRequest, ValueSource,
};
pub use query::{build_query, reduce_title, QueryPlan, QueryVariant, STOP_TERMS};
pub use recommend::{RecommendationEngine, STRONG_DATA_ABOVE};
pub use report::{
    compose_narrative, market_context, market_section, recommendation_section,
    ANALYSIS_UNAVAILABLE, MARKET_HEADING, RECOMMENDATION_HEADING,
};
pub use summarizer::StatisticalSummarizer;
