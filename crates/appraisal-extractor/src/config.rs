//! Configuration for the price extractor

use serde::{Deserialize, Serialize};

/// Default tag for the structured verdict fallback line
pub const DEFAULT_VERDICT_TAG: &str = "ESTIMATED_VALUE";

/// Configuration for the price extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Smallest plausible price in free text (inclusive)
    pub min_plausible: f64,

    /// Largest plausible price in free text (inclusive)
    pub max_plausible: f64,

    /// Only accept free-text amounts written with a `$`
    ///
    /// Bare numbers in search snippets are mostly years, model numbers and
    /// quantities.
    pub require_currency_symbol: bool,

    /// Tag of the fallback verdict line, e.g. `ESTIMATED_VALUE: 125.50`
    pub verdict_tag: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_plausible: 1.0,
            max_plausible: 100_000.0,
            require_currency_symbol: true,
            verdict_tag: DEFAULT_VERDICT_TAG.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Lenient preset: bare numbers count as prices too
    pub fn lenient() -> Self {
        Self {
            require_currency_symbol: false,
            ..Self::default()
        }
    }

    /// Whether a value lies inside the plausibility window
    pub fn is_plausible(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min_plausible && value <= self.max_plausible
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_plausible.is_finite() || self.min_plausible < 0.0 {
            return Err("min_plausible must be a non-negative number".to_string());
        }
        if !self.max_plausible.is_finite() || self.max_plausible <= self.min_plausible {
            return Err(format!(
                "max_plausible ({}) must be greater than min_plausible ({})",
                self.max_plausible, self.min_plausible
            ));
        }
        if self.verdict_tag.is_empty() {
            return Err("verdict_tag cannot be empty".to_string());
        }
        if !self
            .verdict_tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(format!(
                "verdict_tag '{}' may only contain letters, digits and underscores",
                self.verdict_tag
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
