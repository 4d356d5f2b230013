//! Source aggregation: one structured lookup plus a search fan-out
//!
//! Every collaborator call runs under its own timeout and is dropped when
//! the timeout fires. A failed, timed-out or panicking call degrades that
//! one source to no data and is logged; it never aborts the others.

use crate::config::EngineConfig;
use crate::query::{build_query, QueryPlan, QueryVariant};
use appraisal_domain::{
    SoldPriceSource, SoldStats, TaggedRecord, TextSearchSource, RECENT_SALES_LIMIT,
};
use futures::future::join_all;
use futures::FutureExt;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Everything the sources returned for one item
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// Reduced query sent to every source
    pub query: String,

    /// Sold-listing statistics (zero-count when the source failed)
    pub structured: SoldStats,

    /// Search hits tagged with provenance, in plan order
    pub unstructured: Vec<TaggedRecord>,

    /// Collaborator calls that failed or timed out
    pub absorbed_failures: usize,
}

/// Queries the structured and unstructured sources for an item
pub struct SourceAggregator<S, T> {
    sold_source: Arc<S>,
    search_source: Arc<T>,
    config: EngineConfig,
}

/// Await a collaborator call, absorbing failure, panic and timeout
async fn call_isolated<R, E, F>(source: &str, query: &str, limit: Duration, call: F) -> Option<R>
where
    F: Future<Output = Result<R, E>>,
    E: Display,
{
    match timeout(limit, AssertUnwindSafe(call).catch_unwind()).await {
        Ok(Ok(Ok(value))) => Some(value),
        Ok(Ok(Err(e))) => {
            warn!(source, query, error = %e, "Source call failed, continuing without it");
            None
        }
        Ok(Err(_)) => {
            warn!(source, query, "Source call panicked, continuing without it");
            None
        }
        Err(_) => {
            warn!(
                source,
                query,
                timeout_secs = limit.as_secs(),
                "Source call timed out, continuing without it"
            );
            None
        }
    }
}

impl<S, T> SourceAggregator<S, T>
where
    S: SoldPriceSource,
    S::Error: Display,
    T: TextSearchSource,
    T::Error: Display,
{
    /// Create an aggregator over the given sources
    pub fn new(sold_source: S, search_source: T, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(sold_source), Arc::new(search_source), config)
    }

    /// Create an aggregator over shared sources
    ///
    /// Lets one value (a market fixture, say) serve both roles.
    pub fn from_shared(sold_source: Arc<S>, search_source: Arc<T>, config: EngineConfig) -> Self {
        Self {
            sold_source,
            search_source,
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plan the queries for an item
    pub fn plan(&self, title: &str, description: Option<&str>) -> QueryPlan {
        let base = build_query(title, description, self.config.max_query_terms);
        QueryPlan::new(base, &self.config)
    }

    /// Query every source for an item
    ///
    /// The structured lookup and all search variants run concurrently.
    pub async fn aggregate(&self, title: &str, description: Option<&str>) -> AggregateResult {
        let plan = self.plan(title, description);
        info!(query = %plan.base, variants = plan.variants.len(), "Aggregating market data");

        let (structured, searches) = tokio::join!(
            self.fetch_structured(&plan.base),
            join_all(plan.variants.iter().map(|variant| self.fetch_variant(variant)))
        );

        let mut absorbed_failures = usize::from(structured.is_none());
        let mut unstructured = Vec::new();
        for records in searches {
            match records {
                Some(records) => unstructured.extend(records),
                None => absorbed_failures += 1,
            }
        }

        let structured = structured.unwrap_or_else(SoldStats::empty);
        debug!(
            sold = structured.count,
            hits = unstructured.len(),
            absorbed_failures,
            "Aggregation finished"
        );

        AggregateResult {
            query: plan.base,
            structured,
            unstructured,
            absorbed_failures,
        }
    }

    async fn fetch_structured(&self, query: &str) -> Option<SoldStats> {
        let name = self.sold_source.name();
        let mut stats = call_isolated(
            name,
            query,
            self.config.source_timeout(),
            self.sold_source.sold_stats(query),
        )
        .await?;

        // Sources may hand back more recent sales than the engine uses
        stats.sample.truncate(RECENT_SALES_LIMIT);

        debug!(source = name, query, count = stats.count, "Structured lookup done");
        Some(stats)
    }

    async fn fetch_variant(&self, variant: &QueryVariant) -> Option<Vec<TaggedRecord>> {
        let name = self.search_source.name();
        let hits = call_isolated(
            name,
            &variant.query,
            self.config.source_timeout(),
            self.search_source.search(&variant.query, variant.limit),
        )
        .await?;

        debug!(source = name, query = %variant.query, hits = hits.len(), "Search done");
        Some(
            hits.into_iter()
                .take(variant.keep)
                .map(|hit| TaggedRecord::search(variant.provenance, variant.query.clone(), hit))
                .collect(),
        )
    }
}
