//! Source records returned by collaborators
//!
//! Records are read-only once a collaborator hands them over. The engine
//! extracts numbers from them but never rewrites them.

use crate::money::{format_usd, round_cents};
use crate::signal::Provenance;

/// Maximum number of recent sold items kept alongside sold-listing statistics
pub const RECENT_SALES_LIMIT: usize = 10;

/// A completed sale reported by the structured marketplace source
#[derive(Debug, Clone, PartialEq)]
pub struct SoldItem {
    /// Listing title
    pub title: String,

    /// Final sale price
    pub price: f64,

    /// Condition label as reported by the marketplace
    pub condition: Option<String>,

    /// When the listing ended
    pub sold_date: Option<String>,

    /// Link to the listing
    pub link: Option<String>,
}

impl SoldItem {
    /// Create a sold item with only a title and price
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
            condition: None,
            sold_date: None,
            link: None,
        }
    }
}

/// An unstructured search result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchHit {
    /// Result title
    pub title: String,

    /// Result link
    pub link: String,

    /// Text snippet shown under the result
    pub snippet: String,
}

impl SearchHit {
    /// Create a search hit
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }
}

/// Raw payload from one collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRecord {
    /// A structured completed sale
    Sold(SoldItem),

    /// An unstructured search hit
    Search(SearchHit),
}

impl SourceRecord {
    /// Title of the underlying record
    pub fn title(&self) -> &str {
        match self {
            SourceRecord::Sold(item) => &item.title,
            SourceRecord::Search(hit) => &hit.title,
        }
    }

    /// Text that may carry price mentions (title and snippet)
    pub fn searchable_text(&self) -> String {
        match self {
            SourceRecord::Sold(item) => item.title.clone(),
            SourceRecord::Search(hit) => format!("{}\n{}", hit.title, hit.snippet),
        }
    }
}

/// A source record tagged with its provenance and the query that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRecord {
    /// Provenance used for downstream weighting
    pub provenance: Provenance,

    /// Query variant that returned the record
    pub query: String,

    /// The untouched record
    pub record: SourceRecord,
}

impl TaggedRecord {
    /// Tag a search hit
    pub fn search(provenance: Provenance, query: impl Into<String>, hit: SearchHit) -> Self {
        Self {
            provenance,
            query: query.into(),
            record: SourceRecord::Search(hit),
        }
    }
}

/// Sold-listing statistics from the structured source
///
/// A zero-count value is the contractual answer when the structured source
/// has no credentials or no data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoldStats {
    /// Number of sales with a usable price
    pub count: usize,

    /// Average sale price, rounded to cents
    pub average: f64,

    /// Lowest sale price
    pub min: f64,

    /// Highest sale price
    pub max: f64,

    /// Most recent sold items (at most [`RECENT_SALES_LIMIT`])
    pub sample: Vec<SoldItem>,
}

impl SoldStats {
    /// Zero-count statistics
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build statistics from raw sold items
    ///
    /// Items without a positive price are ignored for the statistics. The
    /// sample keeps the first [`RECENT_SALES_LIMIT`] items in the order given,
    /// which collaborators are expected to sort by end date.
    ///
    /// # Examples
    ///
    /// ```
    /// use appraisal_domain::{SoldItem, SoldStats};
    ///
    /// let stats = SoldStats::from_items(vec![
    ///     SoldItem::new("a", 10.0),
    ///     SoldItem::new("b", 20.0),
    ///     SoldItem::new("c", 0.0),
    /// ]);
    /// assert_eq!(stats.count, 2);
    /// assert_eq!(stats.average, 15.0);
    /// ```
    pub fn from_items(items: Vec<SoldItem>) -> Self {
        let prices: Vec<f64> = items
            .iter()
            .map(|item| item.price)
            .filter(|price| price.is_finite() && *price > 0.0)
            .collect();

        if prices.is_empty() {
            return Self::empty();
        }

        let sum: f64 = prices.iter().sum();
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count: prices.len(),
            average: round_cents(sum / prices.len() as f64),
            min,
            max,
            sample: items.into_iter().take(RECENT_SALES_LIMIT).collect(),
        }
    }

    /// Whether the structured source reported at least one sale
    pub fn has_sales(&self) -> bool {
        self.count > 0
    }

    /// Human-readable price range of the reported sales
    pub fn price_range_label(&self) -> String {
        if !self.has_sales() {
            return "No data available".to_string();
        }
        format!("{} - {}", format_usd(self.min, 2), format_usd(self.max, 2))
    }

    /// Sold sample items as tagged records
    pub fn tagged_sample(&self, query: &str) -> Vec<TaggedRecord> {
        self.sample
            .iter()
            .cloned()
            .map(|item| TaggedRecord {
                provenance: Provenance::StructuredSold,
                query: query.to_string(),
                record: SourceRecord::Sold(item),
            })
            .collect()
    }
}
