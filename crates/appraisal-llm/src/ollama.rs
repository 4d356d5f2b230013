//! Ollama narrator implementation
//!
//! Sends the valuation prompt to a local Ollama instance. One request per
//! narrative, bounded by the client timeout; the engine decides what to do
//! when it fails. Dropping the `generate` future aborts the request.
//!
//! # Examples
//!
//! ```no_run
//! use appraisal_llm::{NarratorConfig, OllamaNarrator};
//!
//! let config = NarratorConfig {
//!     enabled: true,
//!     model: "llava".to_string(),
//!     ..NarratorConfig::default()
//! };
//! let narrator = OllamaNarrator::new(config).unwrap();
//! ```

use crate::config::NarratorConfig;
use crate::prompt::PromptBuilder;
use crate::LlmError;
use appraisal_domain::{NarrativeGenerator, NarrativeRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Narrative generator backed by the Ollama generate API
pub struct OllamaNarrator {
    config: NarratorConfig,
    client: reqwest::Client,
    verdict_tag: Option<String>,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaNarrator {
    /// Create a narrator from a validated configuration
    pub fn new(config: NarratorConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            config,
            client,
            verdict_tag: None,
        })
    }

    /// Name a different verdict tag in the prompt
    pub fn with_verdict_tag(mut self, tag: impl Into<String>) -> Self {
        self.verdict_tag = Some(tag.into());
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    /// Build the prompt for a request
    pub fn prompt_for(&self, request: &NarrativeRequest) -> String {
        let builder = PromptBuilder::new(request);
        match &self.verdict_tag {
            Some(tag) => builder.with_verdict_tag(tag.clone()).build(),
            None => builder.build(),
        }
    }

    /// Generate a narrative asynchronously
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running or the request times out
    /// - Model is not available
    /// - Response format is invalid
    pub async fn generate_async(&self, request: &NarrativeRequest) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.config.endpoint.trim_end_matches('/'));

        let body = OllamaGenerateRequest {
            model: self.config.model.clone(),
            prompt: self.prompt_for(request),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
            },
        };

        debug!(model = %self.config.model, title = %request.title, "Requesting narrative");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.config.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed = response
            .json::<OllamaGenerateResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if parsed.response.trim().is_empty() {
            return Err(LlmError::InvalidResponse("Empty narrative".to_string()));
        }

        Ok(parsed.response)
    }
}

#[async_trait]
impl NarrativeGenerator for OllamaNarrator {
    type Error = LlmError;

    async fn generate(&self, request: &NarrativeRequest) -> Result<String, Self::Error> {
        self.generate_async(request).await
    }
}
