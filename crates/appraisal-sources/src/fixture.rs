//! JSON-backed market data
//!
//! A fixture stands in for both the marketplace API and web search when
//! running offline. Each entry lists keywords; an entry answers a query
//! when every keyword occurs in it (case-insensitive).
//!
//! ```json
//! {
//!   "sold": [
//!     { "keywords": ["fenton", "lamp"],
//!       "items": [ { "title": "Fenton lamp", "price": 85.0 } ] }
//!   ],
//!   "search": [
//!     { "keywords": ["fenton"], "site": "etsy.com",
//!       "hits": [ { "title": "Fenton lamp", "link": "https://...", "snippet": "Sold for $90" } ] }
//!   ]
//! }
//! ```
//!
//! Search groups with a `site` only answer queries carrying the matching
//! `site:` operator; groups without one only answer unscoped queries.

use crate::error::SourceError;
use appraisal_domain::{SearchHit, SoldItem, SoldPriceSource, SoldStats, TextSearchSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A sold item as stored in a fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSale {
    /// Listing title
    pub title: String,
    /// Final price
    pub price: f64,
    /// Condition label
    #[serde(default)]
    pub condition: Option<String>,
    /// End date
    #[serde(default)]
    pub sold_date: Option<String>,
    /// Listing link
    #[serde(default)]
    pub link: Option<String>,
}

/// A search hit as stored in a fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureHit {
    /// Result title
    pub title: String,
    /// Result link
    #[serde(default)]
    pub link: String,
    /// Result snippet
    #[serde(default)]
    pub snippet: String,
}

/// Sold listings answering queries that contain all keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldGroup {
    /// Keywords that must all appear in the query
    pub keywords: Vec<String>,
    /// Sold items, most recent first
    pub items: Vec<FixtureSale>,
}

/// Search hits answering queries that contain all keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchGroup {
    /// Keywords that must all appear in the query
    pub keywords: Vec<String>,
    /// Site the hits belong to, matched against `site:` operators
    #[serde(default)]
    pub site: Option<String>,
    /// Hits in rank order
    pub hits: Vec<FixtureHit>,
}

/// Offline market data for both source roles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketFixture {
    /// Sold-listing groups
    #[serde(default)]
    pub sold: Vec<SoldGroup>,
    /// Search-hit groups
    #[serde(default)]
    pub search: Vec<SearchGroup>,
}

impl From<FixtureSale> for SoldItem {
    fn from(sale: FixtureSale) -> Self {
        SoldItem {
            title: sale.title,
            price: sale.price,
            condition: sale.condition,
            sold_date: sale.sold_date,
            link: sale.link,
        }
    }
}

impl From<FixtureHit> for SearchHit {
    fn from(hit: FixtureHit) -> Self {
        SearchHit::new(hit.title, hit.link, hit.snippet)
    }
}

fn matches_keywords(keywords: &[String], query: &str) -> bool {
    let query = query.to_lowercase();
    !keywords.is_empty()
        && keywords
            .iter()
            .all(|keyword| query.contains(&keyword.to_lowercase()))
}

fn site_operator(query: &str) -> Option<String> {
    query
        .split_whitespace()
        .find_map(|token| token.strip_prefix("site:"))
        .map(|site| site.to_lowercase())
}

impl MarketFixture {
    /// Parse a fixture from JSON
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let fixture: MarketFixture = serde_json::from_str(json)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Load a fixture from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Check that every group can match something
    pub fn validate(&self) -> Result<(), SourceError> {
        for (idx, group) in self.sold.iter().enumerate() {
            if group.keywords.is_empty() {
                return Err(SourceError::Fixture(format!("sold group {} has no keywords", idx)));
            }
        }
        for (idx, group) in self.search.iter().enumerate() {
            if group.keywords.is_empty() {
                return Err(SourceError::Fixture(format!(
                    "search group {} has no keywords",
                    idx
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SoldPriceSource for MarketFixture {
    type Error = SourceError;

    fn name(&self) -> &str {
        "fixture-sold"
    }

    async fn sold_stats(&self, query: &str) -> Result<SoldStats, Self::Error> {
        let items: Vec<SoldItem> = self
            .sold
            .iter()
            .filter(|group| matches_keywords(&group.keywords, query))
            .flat_map(|group| group.items.iter().cloned().map(SoldItem::from))
            .collect();

        debug!(query, items = items.len(), "Fixture sold lookup");
        Ok(SoldStats::from_items(items))
    }
}

#[async_trait]
impl TextSearchSource for MarketFixture {
    type Error = SourceError;

    fn name(&self) -> &str {
        "fixture-search"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, Self::Error> {
        let site = site_operator(query);
        // Keywords are matched against the query without its operators
        let terms: String = query
            .split_whitespace()
            .filter(|token| !token.starts_with("site:"))
            .collect::<Vec<_>>()
            .join(" ");

        let hits: Vec<SearchHit> = self
            .search
            .iter()
            .filter(|group| group.site.as_ref().map(|s| s.to_lowercase()) == site)
            .filter(|group| matches_keywords(&group.keywords, &terms))
            .flat_map(|group| group.hits.iter().cloned().map(SearchHit::from))
            .take(limit)
            .collect();

        debug!(query, hits = hits.len(), "Fixture search");
        Ok(hits)
    }
}
