//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extractor setup error
    #[error("Extractor error: {0}")]
    Extractor(#[from] appraisal_extractor::ExtractorError),

    /// Narrator setup error
    #[error("Narrator error: {0}")]
    Llm(#[from] appraisal_llm::LlmError),

    /// Market fixture error
    #[error("Market data error: {0}")]
    Source(#[from] appraisal_sources::SourceError),

    /// Valuation error
    #[error("Valuation error: {0}")]
    Engine(#[from] appraisal_engine::EngineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
