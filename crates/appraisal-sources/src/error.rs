//! Error types for market data sources

use thiserror::Error;

/// Errors that can occur while querying or loading a source
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source could not be reached
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Fixture data is malformed
    #[error("Invalid fixture: {0}")]
    Fixture(String),

    /// Fixture file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
