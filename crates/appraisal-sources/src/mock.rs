//! Deterministic sources with failure injection and call recording

use crate::error::SourceError;
use appraisal_domain::{SearchHit, SoldPriceSource, SoldStats, TextSearchSource};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock structured sold-listing source
///
/// Clones share recorded queries.
#[derive(Debug, Clone, Default)]
pub struct MockSoldSource {
    stats: SoldStats,
    fail: bool,
    delay: Option<Duration>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSoldSource {
    /// Answer every query with `stats`
    pub fn new(stats: SoldStats) -> Self {
        Self {
            stats,
            ..Self::default()
        }
    }

    /// Answer every query with zero-count statistics
    pub fn empty() -> Self {
        Self::new(SoldStats::empty())
    }

    /// Fail every query
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SoldPriceSource for MockSoldSource {
    type Error = SourceError;

    fn name(&self) -> &str {
        "mock-sold"
    }

    async fn sold_stats(&self, query: &str) -> Result<SoldStats, Self::Error> {
        self.queries.lock().unwrap().push(query.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(SourceError::Unavailable("mock sold source down".to_string()));
        }
        Ok(self.stats.clone())
    }
}

/// Mock text search source
///
/// Queries are matched exactly; anything unmatched gets the default hits.
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    default_hits: Vec<SearchHit>,
    responses: HashMap<String, Vec<SearchHit>>,
    failing: HashSet<String>,
    slow: HashMap<String, Duration>,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockSearch {
    /// Return no hits for any query
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `hits` for every unmatched query
    pub fn with_default_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.default_hits = hits;
        self
    }

    /// Return `hits` for `query`
    pub fn with_response(mut self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.responses.insert(query.into(), hits);
        self
    }

    /// Fail `query`
    pub fn with_failure(mut self, query: impl Into<String>) -> Self {
        self.failing.insert(query.into());
        self
    }

    /// Wait `delay` before answering `query`
    pub fn with_slow_query(mut self, query: impl Into<String>, delay: Duration) -> Self {
        self.slow.insert(query.into(), delay);
        self
    }

    /// `(query, limit)` pairs received so far, in call order
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of searches issued
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextSearchSource for MockSearch {
    type Error = SourceError;

    fn name(&self) -> &str {
        "mock-search"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, Self::Error> {
        self.calls.lock().unwrap().push((query.to_string(), limit));

        if let Some(delay) = self.slow.get(query).copied() {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(query) {
            return Err(SourceError::Unavailable(format!("search failed for '{}'", query)));
        }

        let hits = self.responses.get(query).unwrap_or(&self.default_hits);
        Ok(hits.iter().take(limit).cloned().collect())
    }
}
