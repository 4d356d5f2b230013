//! Error types for the price extractor

use thiserror::Error;

/// Errors that can occur while building an extractor
///
/// Extraction itself never fails: a text without prices yields nothing.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The verdict tag could not be turned into a pattern
    #[error("Invalid verdict tag pattern: {0}")]
    Pattern(#[from] regex::Error),
}
