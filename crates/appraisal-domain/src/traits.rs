//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the valuation engine and the
//! collaborators it consumes. Implementations live in other crates and are
//! injected into the engine's constructors.
//!
//! The network-facing collaborators are async so that a timed-out or
//! cancelled call is dropped along with its future.

use crate::record::{SearchHit, SoldStats};
use async_trait::async_trait;

/// Structured sold-listing source (a marketplace API)
///
/// Implementations should answer with [`SoldStats::empty`] rather than an
/// error when credentials or data are missing. The engine still absorbs
/// errors if they happen.
#[async_trait]
pub trait SoldPriceSource: Send + Sync {
    /// Error type for source operations
    type Error: Send;

    /// Short name used in logs
    fn name(&self) -> &str {
        "sold-listings"
    }

    /// Sold-listing statistics for a query
    async fn sold_stats(&self, query: &str) -> Result<SoldStats, Self::Error>;
}

/// Free-text search source (general web search)
///
/// Implementations should return an empty list on failure.
#[async_trait]
pub trait TextSearchSource: Send + Sync {
    /// Error type for search operations
    type Error: Send;

    /// Short name used in logs
    fn name(&self) -> &str {
        "web-search"
    }

    /// Search results for a query, at most `limit` of them
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, Self::Error>;
}

/// Input for the narrative generator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NarrativeRequest {
    /// Item title
    pub title: String,

    /// Image references (URLs or paths)
    pub image_refs: Vec<String>,

    /// Optional item description
    pub description: Option<String>,

    /// Market research summary rendered as text
    pub market_context: String,

    /// Current bidding price, used as an anchor
    pub current_price: Option<f64>,
}

/// Reasoning-model narrative generator
///
/// On success the first line of the returned text is contractually the
/// model's bare numeric verdict.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Error type for generation
    type Error: Send;

    /// Generate a narrative valuation
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, Self::Error>;
}

/// Extracts candidate prices from text
///
/// A miss is not an error: it is an empty list or `None`.
pub trait PriceExtractor {
    /// Plausible prices mentioned anywhere in free text
    fn extract(&self, text: &str) -> Vec<f64>;

    /// The model's numeric verdict from a narrative response, unfiltered
    fn extract_verdict(&self, narrative: &str) -> Option<f64>;

    /// Whether a price may enter a distribution
    fn admits(&self, value: f64) -> bool {
        value.is_finite() && value >= 0.0
    }

    /// Narrative prose with the verdict removed
    fn analysis(&self, narrative: &str) -> String {
        narrative.trim().to_string()
    }
}
