//! Selling recommendations

use crate::money::format_usd;
use std::fmt;

/// A recommended price: either one amount or a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceGuide {
    /// Single amount
    Amount(f64),
    /// Inclusive range
    Range {
        /// Lower end
        low: f64,
        /// Upper end
        high: f64,
    },
}

impl PriceGuide {
    /// Representative amount (range midpoint for ranges)
    pub fn amount(&self) -> f64 {
        match self {
            PriceGuide::Amount(value) => *value,
            PriceGuide::Range { low, high } => (low + high) / 2.0,
        }
    }
}

impl fmt::Display for PriceGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceGuide::Amount(value) => f.write_str(&format_usd(*value, 0)),
            PriceGuide::Range { low, high } => {
                write!(f, "{} - {}", format_usd(*low, 0), format_usd(*high, 0))
            }
        }
    }
}

/// Listing guidance derived from a valuation summary
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Suggested listing price
    pub list_price: PriceGuide,

    /// Accept offers above this
    pub accept_above: PriceGuide,

    /// Price for a fast sale (absent when data is too thin to say)
    pub quick_sale_price: Option<PriceGuide>,

    /// Pricing strategy in prose
    pub strategy: String,

    /// Qualitative notes that affect the price
    pub factors: Vec<String>,
}
