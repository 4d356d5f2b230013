//! Batch command implementation.

use crate::cli::BatchArgs;
use crate::commands::CliOrchestrator;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use appraisal_engine::{BatchValuator, ValuationRequest};
use appraisal_extractor::parse_listing_price;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// One entry of a batch file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchItem {
    /// Auction title
    pub title: String,

    /// Item description
    #[serde(default)]
    pub description: Option<String>,

    /// Image URLs or paths
    #[serde(default)]
    pub images: Vec<String>,

    /// Current listing price as shown on the auction, e.g. "$12.50 (3 bids)"
    #[serde(default)]
    pub current_price: Option<String>,
}

impl BatchItem {
    /// Convert to a valuation request.
    ///
    /// An unreadable listing price is dropped rather than failing the item.
    pub fn into_request(self) -> ValuationRequest {
        let current_price = self.current_price.as_deref().and_then(|listing| {
            let price = parse_listing_price(listing);
            if price.is_none() {
                warn!(title = %self.title, listing, "Ignoring unreadable listing price");
            }
            price
        });

        ValuationRequest {
            title: self.title,
            image_refs: self.images,
            description: self.description,
            current_price,
        }
    }
}

/// Read a JSON array of batch items.
pub fn load_items(path: &Path) -> Result<Vec<BatchItem>> {
    let contents = fs::read_to_string(path)?;
    let items: Vec<BatchItem> = serde_json::from_str(&contents)?;
    if items.is_empty() {
        return Err(CliError::InvalidInput(format!("{} contains no items", path.display())));
    }
    Ok(items)
}

/// Execute the batch command.
///
/// Ctrl+C cancels the items that have not finished; finished results are
/// still printed.
pub async fn execute_batch(args: BatchArgs, orchestrator: CliOrchestrator, formatter: &Formatter) -> Result<()> {
    let items = load_items(&args.file)?;
    let titles: Vec<String> = items.iter().map(|item| item.title.clone()).collect();
    let requests: Vec<ValuationRequest> = items.into_iter().map(BatchItem::into_request).collect();

    let valuator = BatchValuator::new(orchestrator);
    let token = valuator.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling remaining items");
            token.cancel();
        }
    });

    let report = valuator.run(requests).await;
    interrupt.abort();

    println!("{}", formatter.format_batch(&titles, &report)?);
    if report.metrics.succeeded < report.metrics.total() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} of {} items did not complete",
                report.metrics.total() - report.metrics.succeeded,
                report.metrics.total()
            ))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_defaults() {
        let items: Vec<BatchItem> = serde_json::from_str(r#"[{ "title": "Pyrex bowl" }]"#).unwrap();
        assert_eq!(items[0].description, None);
        assert!(items[0].images.is_empty());
        assert_eq!(items[0].clone().into_request(), ValuationRequest::new("Pyrex bowl"));
    }

    #[test]
    fn test_listing_price_parsed_or_dropped() {
        let item = BatchItem {
            title: "Zippo".to_string(),
            description: None,
            images: Vec::new(),
            current_price: Some("$12.50 (3 bids)".to_string()),
        };
        assert_eq!(item.clone().into_request().current_price, Some(12.5));

        let unreadable = BatchItem {
            current_price: Some("make an offer".to_string()),
            ..item
        };
        assert_eq!(unreadable.into_request().current_price, None);
    }
}
