//! Configuration for the valuation engine

use appraisal_domain::ConfidenceThresholds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the valuation engine
///
/// # Examples
///
/// ```
/// use appraisal_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.structured_weight_cap, 20);
/// assert_eq!(config.max_concurrent_items, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Replicas of the sold average added per structured sale
    pub structured_weight_per_sale: usize,

    /// Upper bound on replicas of the sold average
    pub structured_weight_cap: usize,

    /// Quartiles replace min/max once the sample is larger than this
    pub quartile_min_sample: usize,

    /// HIGH confidence above this sample size
    pub high_confidence_above: usize,

    /// MEDIUM confidence above this sample size
    pub medium_confidence_above: usize,

    /// Value returned when neither narrative nor market data yields one
    pub fallback_value: f64,

    /// Time budget for one collaborator call (seconds)
    pub source_timeout_secs: u64,

    /// Time budget for the narrative call (seconds)
    pub narrative_timeout_secs: u64,

    /// Time budget for one whole valuation (seconds)
    pub item_timeout_secs: u64,

    /// Items valued at the same time in a batch
    pub max_concurrent_items: usize,

    /// Hits kept from the general search
    pub general_result_keep: usize,

    /// Hits requested from each site-scoped search
    pub scoped_result_limit: usize,

    /// Hits requested from the general search
    pub general_result_limit: usize,

    /// Terms kept in the reduced query
    pub max_query_terms: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            structured_weight_per_sale: 2,
            structured_weight_cap: 20,
            quartile_min_sample: 4,
            high_confidence_above: 10,
            medium_confidence_above: 5,
            fallback_value: 25.0,
            source_timeout_secs: 15,
            narrative_timeout_secs: 60,
            item_timeout_secs: 120,
            max_concurrent_items: 3,
            general_result_keep: 5,
            scoped_result_limit: 3,
            general_result_limit: 10,
            max_query_terms: 5,
        }
    }
}

impl EngineConfig {
    /// Aggressive preset: short timeouts, more items in flight
    pub fn aggressive() -> Self {
        Self {
            source_timeout_secs: 5,
            narrative_timeout_secs: 20,
            item_timeout_secs: 45,
            max_concurrent_items: 6,
            ..Self::default()
        }
    }

    /// Lenient preset: long timeouts, one item at a time
    pub fn lenient() -> Self {
        Self {
            source_timeout_secs: 30,
            narrative_timeout_secs: 180,
            item_timeout_secs: 300,
            max_concurrent_items: 1,
            ..Self::default()
        }
    }

    /// Confidence thresholds for the summarizer
    pub fn confidence_thresholds(&self) -> ConfidenceThresholds {
        ConfidenceThresholds {
            high_above: self.high_confidence_above,
            medium_above: self.medium_confidence_above,
        }
    }

    /// Get the per-source timeout as a Duration
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    /// Get the narrative timeout as a Duration
    pub fn narrative_timeout(&self) -> Duration {
        Duration::from_secs(self.narrative_timeout_secs)
    }

    /// Get the per-item timeout as a Duration
    pub fn item_timeout(&self) -> Duration {
        Duration::from_secs(self.item_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.confidence_thresholds().validate()?;

        if !self.fallback_value.is_finite() || self.fallback_value < 0.0 {
            return Err("fallback_value must be a non-negative number".to_string());
        }
        if self.source_timeout_secs == 0
            || self.narrative_timeout_secs == 0
            || self.item_timeout_secs == 0
        {
            return Err("timeouts must be greater than 0".to_string());
        }
        if self.max_concurrent_items == 0 {
            return Err("max_concurrent_items must be greater than 0".to_string());
        }
        if self.max_query_terms == 0 {
            return Err("max_query_terms must be greater than 0".to_string());
        }
        if self.general_result_keep > self.general_result_limit {
            return Err(format!(
                "general_result_keep ({}) cannot exceed general_result_limit ({})",
                self.general_result_keep, self.general_result_limit
            ));
        }
        if self.structured_weight_per_sale > 0 && self.structured_weight_cap == 0 {
            return Err("structured_weight_cap must be greater than 0 when weighting".to_string());
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
