//! Appraisal Narrative Generators
//!
//! Implementations of the `NarrativeGenerator` trait from `appraisal-domain`.
//!
//! # Generators
//!
//! - `MockNarrator`: Deterministic narrator for testing
//! - `OllamaNarrator`: Local Ollama API integration
//!
//! Both follow narrative protocol v1 (see [`prompt`]): the first line of a
//! response is the bare numeric verdict.
//!
//! # Examples
//!
//! ```
//! use appraisal_domain::{NarrativeGenerator, NarrativeRequest};
//! use appraisal_llm::MockNarrator;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let narrator = MockNarrator::new("125.50\nA solid example.");
//! let request = NarrativeRequest {
//!     title: "Tin toy robot".to_string(),
//!     ..NarrativeRequest::default()
//! };
//! assert_eq!(
//!     narrator.generate(&request).await.unwrap(),
//!     "125.50\nA solid example."
//! );
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod ollama;
pub mod prompt;

use appraisal_domain::{NarrativeGenerator, NarrativeRequest};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use config::NarratorConfig;
pub use ollama::OllamaNarrator;
pub use prompt::{PromptBuilder, NARRATIVE_PROTOCOL_VERSION};

/// Errors that can occur while generating a narrative
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Request exceeded the client timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock narrator for deterministic testing
///
/// Returns pre-configured responses keyed by item title without any network
/// calls. Clones share call counts and recorded requests.
///
/// # Examples
///
/// ```
/// use appraisal_domain::{NarrativeGenerator, NarrativeRequest};
/// use appraisal_llm::MockNarrator;
///
/// # #[tokio::main]
/// # async fn main() {
/// let narrator = MockNarrator::default()
///     .with_response("Lamp", "80\nNice lamp.")
///     .with_error("Vase");
///
/// let lamp = NarrativeRequest { title: "Lamp".into(), ..Default::default() };
/// let vase = NarrativeRequest { title: "Vase".into(), ..Default::default() };
/// assert_eq!(narrator.generate(&lamp).await.unwrap(), "80\nNice lamp.");
/// assert!(narrator.generate(&vase).await.is_err());
/// assert_eq!(narrator.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockNarrator {
    default_response: Option<String>,
    responses: Arc<Mutex<HashMap<String, String>>>,
    failing_titles: Arc<Mutex<HashSet<String>>>,
    requests: Arc<Mutex<Vec<NarrativeRequest>>>,
    delay: Option<Duration>,
}

impl MockNarrator {
    /// Create a narrator that answers every request with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            failing_titles: Arc::new(Mutex::new(HashSet::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create a narrator that fails every request
    pub fn failing() -> Self {
        Self {
            default_response: None,
            ..Self::new("")
        }
    }

    /// Answer requests for `title` with `response`
    pub fn with_response(self, title: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(title.into(), response.into());
        self
    }

    /// Fail requests for `title`
    pub fn with_error(self, title: impl Into<String>) -> Self {
        self.failing_titles.lock().unwrap().insert(title.into());
        self
    }

    /// Wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<NarrativeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockNarrator {
    fn default() -> Self {
        Self::new("Default mock narrative")
    }
}

#[async_trait]
impl NarrativeGenerator for MockNarrator {
    type Error = LlmError;

    async fn generate(&self, request: &NarrativeRequest) -> Result<String, Self::Error> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_titles.lock().unwrap().contains(&request.title) {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        if let Some(response) = self.responses.lock().unwrap().get(&request.title) {
            return Ok(response.clone());
        }

        self.default_response
            .clone()
            .ok_or_else(|| LlmError::Communication("Mock narrator unavailable".to_string()))
    }
}
