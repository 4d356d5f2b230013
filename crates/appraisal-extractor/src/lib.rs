//! Appraisal Extractor
//!
//! Finds monetary amounts in free text and in narrative responses.
//!
//! # Overview
//!
//! Two paths share one monetary pattern (optional `$`, digits, optional
//! thousands separators and decimal fraction):
//!
//! - **Free text** (search titles and snippets): every match must fall
//!   inside the plausibility window, and by default must carry a `$`.
//! - **Narrative verdicts**: the first line of the response is the
//!   designated value line and its first number is taken as-is. When it
//!   does not parse, a trailing `ESTIMATED_VALUE: <number>` line is used.
//!
//! A miss is never an error; it is an empty list or `None`.
//!
//! # Example Usage
//!
//! ```
//! use appraisal_domain::PriceExtractor;
//! use appraisal_extractor::RegexPriceExtractor;
//!
//! let extractor = RegexPriceExtractor::default_config().unwrap();
//!
//! let prices = extractor.extract("Sold in 1998 for $45, relisted at $60");
//! assert_eq!(prices, vec![45.0, 60.0]);
//!
//! assert_eq!(extractor.extract_verdict("150.00\nLovely piece"), Some(150.0));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;

#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, DEFAULT_VERDICT_TAG};
pub use error::ExtractorError;
pub use extractor::RegexPriceExtractor;
pub use parser::{parse_listing_price, scan_amounts, AmountMatch};
