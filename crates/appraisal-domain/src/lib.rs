//! Appraisal Domain Layer
//!
//! This crate contains the data model and pure valuation rules shared by every
//! other appraisal crate. It defines the value objects and trait interfaces the
//! engine is written against.
//!
//! ## Key Concepts
//!
//! - **Signal**: one numeric price observation with a provenance tag and weight
//! - **Source record**: raw, read-only payload returned by a collaborator
//! - **Distribution**: the combined, weighted sample of signals
//! - **Confidence tier**: NONE/LOW/MEDIUM/HIGH, a pure function of sample size
//! - **Recommendation**: list / accept-above / quick-sale guidance
//!
//! ## Architecture
//!
//! - Pure data and rules only; the only dependencies are `async-trait` for
//!   the collaborator traits and `rust_decimal` for currency rounding
//! - Collaborators (marketplace API, web search, reasoning model) are traits
//!   implemented in other crates so tests can substitute deterministic fakes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod distribution;
pub mod money;
pub mod recommendation;
pub mod record;
pub mod signal;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use confidence::{ConfidenceThresholds, ConfidenceTier};
pub use distribution::{DistributionStats, PriceDistribution};
pub use money::{format_usd, round_cents};
pub use recommendation::{PriceGuide, Recommendation};
pub use record::{SearchHit, SoldItem, SoldStats, SourceRecord, TaggedRecord, RECENT_SALES_LIMIT};
pub use signal::{PriceSignal, Provenance};
pub use summary::{ValuationStatus, ValuationSummary};
pub use traits::{NarrativeGenerator, NarrativeRequest, PriceExtractor, SoldPriceSource, TextSearchSource};
