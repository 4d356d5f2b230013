//! Value command implementation.

use crate::cli::ValueArgs;
use crate::commands::CliOrchestrator;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use appraisal_engine::ValuationRequest;
use appraisal_extractor::parse_listing_price;

/// Turn command arguments into a valuation request.
pub fn request_from_args(args: &ValueArgs) -> Result<ValuationRequest> {
    let current_price = match &args.current_price {
        Some(listing) => Some(
            parse_listing_price(listing)
                .ok_or_else(|| CliError::InvalidInput(format!("Could not read a price from '{}'", listing)))?,
        ),
        None => None,
    };

    Ok(ValuationRequest {
        title: args.title.clone(),
        image_refs: args.images.clone(),
        description: args.description.clone(),
        current_price,
    })
}

/// Execute the value command.
pub async fn execute_value(args: ValueArgs, orchestrator: &CliOrchestrator, formatter: &Formatter) -> Result<()> {
    let request = request_from_args(&args)?;
    let valuation = orchestrator.valuate_with_timeout(&request).await?;

    println!("{}", formatter.format_valuation(&request.title, &valuation, args.narrative)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(current_price: Option<&str>) -> ValueArgs {
        ValueArgs {
            title: "Tin robot".to_string(),
            description: Some("Wind-up, works".to_string()),
            images: vec!["https://img/1.jpg".to_string()],
            current_price: current_price.map(String::from),
            narrative: false,
        }
    }

    #[test]
    fn test_request_parses_listing_price() {
        let request = request_from_args(&args(Some("$1,234.50 (7 bids)"))).unwrap();
        assert_eq!(request.current_price, Some(1234.5));
        assert_eq!(request.image_refs.len(), 1);
        assert_eq!(request.description.as_deref(), Some("Wind-up, works"));
    }

    #[test]
    fn test_unreadable_listing_price_rejected() {
        let result = request_from_args(&args(Some("no bids yet")));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert_eq!(request_from_args(&args(None)).unwrap().current_price, None);
    }
}
