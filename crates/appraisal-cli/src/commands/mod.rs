//! Command implementations.

pub mod batch;
pub mod config;
pub mod value;

pub use self::batch::execute_batch;
pub use self::config::execute_config;
pub use self::value::execute_value;

use crate::config::AppConfig;
use crate::error::Result;
use appraisal_engine::ValuationOrchestrator;
use appraisal_extractor::RegexPriceExtractor;
use appraisal_llm::{NarratorConfig, OllamaNarrator};
use appraisal_sources::MarketFixture;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrator wired to a market fixture and the Ollama narrator.
pub type CliOrchestrator = ValuationOrchestrator<MarketFixture, MarketFixture, OllamaNarrator, RegexPriceExtractor>;

/// Narrator settings after applying `--ollama-model`.
pub fn effective_narrator(config: &NarratorConfig, ollama_model: Option<&str>) -> NarratorConfig {
    let mut narrator = config.clone();
    if let Some(model) = ollama_model {
        narrator.enabled = true;
        narrator.model = model.to_string();
    }
    narrator
}

/// Load the market fixture, or an empty one when none is given.
pub fn load_market(fixture: Option<&Path>) -> Result<MarketFixture> {
    match fixture {
        Some(path) => {
            let market = MarketFixture::from_path(path)?;
            info!(
                path = %path.display(),
                sold_groups = market.sold.len(),
                search_groups = market.search.len(),
                "Loaded market fixture"
            );
            Ok(market)
        }
        None => {
            warn!("No market fixture given; valuing without market data");
            Ok(MarketFixture::default())
        }
    }
}

/// Build the orchestrator for a command.
pub fn build_orchestrator(config: &AppConfig, market: MarketFixture) -> Result<CliOrchestrator> {
    let market = Arc::new(market);
    let extractor = RegexPriceExtractor::new(config.extractor.clone())?;

    let orchestrator = ValuationOrchestrator::from_shared(
        Arc::clone(&market),
        market,
        Arc::new(extractor),
        config.engine.clone(),
    )?;

    if !config.narrator.enabled {
        return Ok(orchestrator);
    }

    info!(model = %config.narrator.model, endpoint = %config.narrator.endpoint, "Narrator enabled");
    let narrator =
        OllamaNarrator::new(config.narrator.clone())?.with_verdict_tag(config.extractor.verdict_tag.clone());
    Ok(orchestrator.with_narrator(narrator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_model_enables_narrator() {
        let base = NarratorConfig::default();
        assert!(!effective_narrator(&base, None).enabled);

        let narrator = effective_narrator(&base, Some("llama3.2-vision"));
        assert!(narrator.enabled);
        assert_eq!(narrator.model, "llama3.2-vision");
        assert_eq!(narrator.endpoint, base.endpoint);
    }

    #[test]
    fn test_build_without_narrator() {
        let orchestrator = build_orchestrator(&AppConfig::default(), MarketFixture::default()).unwrap();
        assert_eq!(orchestrator.config().fallback_value, 25.0);
    }

    #[test]
    fn test_build_rejects_invalid_engine_config() {
        let mut config = AppConfig::default();
        config.engine.max_concurrent_items = 0;
        assert!(build_orchestrator(&config, MarketFixture::default()).is_err());
    }
}
