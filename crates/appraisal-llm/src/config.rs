//! Configuration for narrative generators

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Configuration for the Ollama narrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    /// Use the Ollama narrator at all
    pub enabled: bool,

    /// Ollama API endpoint
    pub endpoint: String,

    /// Model to use (a vision-capable model when images are passed)
    pub model: String,

    /// HTTP client timeout (seconds)
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "llava".to_string(),
            timeout_secs: 60,
            temperature: 0.2,
        }
    }
}

impl NarratorConfig {
    /// Get the client timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!("endpoint '{}' must be an http(s) URL", self.endpoint));
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NarratorConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.enabled);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = NarratorConfig {
            endpoint: "localhost:11434".to_string(),
            ..NarratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let config = NarratorConfig {
            temperature: 3.5,
            ..NarratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = NarratorConfig {
            enabled: true,
            model: "llama3.2-vision".to_string(),
            ..NarratorConfig::default()
        };
        let parsed = NarratorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
