//! Error types for the valuation engine

use thiserror::Error;

/// Errors surfaced to the engine's caller
///
/// Collaborator failures never show up here; they are absorbed where they
/// happen and logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The request itself is unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The item did not finish within its time budget
    #[error("Valuation timed out after {0}s")]
    Timeout(u64),

    /// The item was cancelled before it finished
    #[error("Valuation cancelled")]
    Cancelled,

    /// An engine task panicked or could not be joined
    #[error("Task error: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
