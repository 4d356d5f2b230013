//! Appraisal Market Sources
//!
//! Offline implementations of the collaborator traits from
//! `appraisal-domain`.
//!
//! - `MockSoldSource` / `MockSearch`: deterministic fakes with failure
//!   injection, delays and call recording
//! - `MarketFixture`: keyword-matched sold listings and search hits loaded
//!   from JSON
//!
//! # Examples
//!
//! ```
//! use appraisal_domain::{SoldItem, SoldPriceSource, SoldStats};
//! use appraisal_sources::MockSoldSource;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = MockSoldSource::new(SoldStats::from_items(vec![
//!     SoldItem::new("Fenton lamp", 80.0),
//! ]));
//! assert_eq!(source.sold_stats("Fenton").await.unwrap().count, 1);
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod fixture;
mod mock;

pub use error::SourceError;
pub use fixture::{FixtureHit, FixtureSale, MarketFixture, SearchGroup, SoldGroup};
pub use mock::{MockSearch, MockSoldSource};
