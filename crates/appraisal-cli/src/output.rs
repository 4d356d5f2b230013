//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use appraisal_domain::{format_usd, ConfidenceTier, PriceGuide};
use appraisal_engine::{BatchReport, Valuation};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn guide_json(guide: &PriceGuide) -> serde_json::Value {
    match guide {
        PriceGuide::Amount(value) => serde_json::json!({ "amount": value }),
        PriceGuide::Range { low, high } => serde_json::json!({ "low": low, "high": high }),
    }
}

/// Structured representation of one valuation.
pub fn valuation_json(title: &str, valuation: &Valuation) -> serde_json::Value {
    let summary = &valuation.summary;
    let recommendation = &valuation.recommendation;

    serde_json::json!({
        "title": title,
        "estimated_value": valuation.estimated_value,
        "value_source": valuation.value_source.as_str(),
        "summary": {
            "status": summary.status.as_str(),
            "confidence": summary.confidence.as_str(),
            "sample_size": summary.sample_size,
            "distinct_values": summary.distinct_values,
            "point_estimate": summary.point_estimate,
            "range": summary.range.map(|(low, high)| serde_json::json!({ "low": low, "high": high })),
            "insights": summary.insights,
        },
        "recommendation": {
            "list_price": guide_json(&recommendation.list_price),
            "accept_above": guide_json(&recommendation.accept_above),
            "quick_sale_price": recommendation.quick_sale_price.as_ref().map(guide_json),
            "strategy": recommendation.strategy,
            "factors": recommendation.factors,
        },
        "narrative": valuation.narrative,
    })
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format one valuation.
    pub fn format_valuation(&self, title: &str, valuation: &Valuation, with_narrative: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&valuation_json(title, valuation))?),
            OutputFormat::Table => Ok(self.valuation_table(title, valuation, with_narrative)),
        }
    }

    fn valuation_table(&self, title: &str, valuation: &Valuation, with_narrative: bool) -> String {
        let summary = &valuation.summary;
        let recommendation = &valuation.recommendation;

        let mut builder = Builder::default();
        builder.push_record(["Field".to_string(), "Value".to_string()]);
        builder.push_record(["Title".to_string(), title.to_string()]);
        builder.push_record([
            "Estimated value".to_string(),
            format!("{} ({})", format_usd(valuation.estimated_value, 2), valuation.value_source),
        ]);
        builder.push_record(["Status".to_string(), summary.status.to_string()]);
        builder.push_record([
            "Confidence".to_string(),
            format!(
                "{} ({} data points)",
                self.confidence_label(summary.confidence),
                summary.sample_size
            ),
        ]);
        builder.push_record(["Market range".to_string(), summary.range_label()]);
        builder.push_record(["List price".to_string(), recommendation.list_price.to_string()]);
        builder.push_record(["Accept offers above".to_string(), recommendation.accept_above.to_string()]);
        if let Some(quick) = &recommendation.quick_sale_price {
            builder.push_record(["Quick sale price".to_string(), quick.to_string()]);
        }
        builder.push_record(["Strategy".to_string(), recommendation.strategy.clone()]);
        if !recommendation.factors.is_empty() {
            builder.push_record(["Factors".to_string(), recommendation.factors.join("\n")]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        if with_narrative {
            format!("{}\n\n{}", table, valuation.narrative)
        } else {
            table.to_string()
        }
    }

    /// Format a batch report; `titles` are in input order.
    pub fn format_batch(&self, titles: &[String], report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = titles
                    .iter()
                    .zip(&report.results)
                    .map(|(title, result)| match result {
                        Ok(valuation) => valuation_json(title, valuation),
                        Err(e) => serde_json::json!({ "title": title, "error": e.to_string() }),
                    })
                    .collect();
                let metrics = &report.metrics;
                let document = serde_json::json!({
                    "items": items,
                    "metrics": {
                        "succeeded": metrics.succeeded,
                        "failed": metrics.failed,
                        "timed_out": metrics.timed_out,
                        "cancelled": metrics.cancelled,
                        "elapsed_secs": metrics.elapsed.as_secs_f64(),
                    },
                });
                Ok(serde_json::to_string_pretty(&document)?)
            }
            OutputFormat::Table => Ok(self.batch_table(titles, report)),
        }
    }

    fn batch_table(&self, titles: &[String], report: &BatchReport) -> String {
        if titles.is_empty() {
            return self.colorize("No items to value.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Title", "Estimate", "Source", "Confidence", "Range", "List price"].map(String::from));

        for (index, (title, result)) in titles.iter().zip(&report.results).enumerate() {
            let row = match result {
                Ok(valuation) => [
                    (index + 1).to_string(),
                    title.clone(),
                    format_usd(valuation.estimated_value, 2),
                    valuation.value_source.to_string(),
                    self.confidence_label(valuation.summary.confidence),
                    valuation.summary.range_label(),
                    valuation.recommendation.list_price.to_string(),
                ],
                Err(e) => [
                    (index + 1).to_string(),
                    title.clone(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    self.colorize(&e.to_string(), "red"),
                ],
            };
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, self.info(&report.metrics.summary()))
    }

    fn confidence_label(&self, confidence: ConfidenceTier) -> String {
        let color = match confidence {
            ConfidenceTier::High => "green",
            ConfidenceTier::Medium => "cyan",
            ConfidenceTier::Low => "yellow",
            ConfidenceTier::None => "red",
        };
        self.colorize(confidence.as_str(), color)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appraisal_domain::{Recommendation, ValuationStatus, ValuationSummary};
    use appraisal_engine::{BatchMetrics, EngineError, ValueSource};

    fn valuation() -> Valuation {
        Valuation {
            estimated_value: 120.0,
            value_source: ValueSource::MarketData,
            narrative: "Analysis unavailable".to_string(),
            summary: ValuationSummary {
                status: ValuationStatus::Success,
                range: Some((100.0, 150.0)),
                point_estimate: Some(120.0),
                confidence: ConfidenceTier::High,
                sample_size: 14,
                distinct_values: 6,
                stats: None,
                insights: vec!["Found 4 sold listings".to_string()],
            },
            recommendation: Recommendation {
                list_price: PriceGuide::Amount(165.0),
                accept_above: PriceGuide::Amount(108.0),
                quick_sale_price: Some(PriceGuide::Amount(100.0)),
                strategy: "List at the upper quartile".to_string(),
                factors: vec!["Rarity premium may apply".to_string()],
            },
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_valuation("Lamp", &valuation(), false).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["estimated_value"], 120.0);
        assert_eq!(parsed["value_source"], "market_data");
        assert_eq!(parsed["summary"]["confidence"], "high");
        assert_eq!(parsed["summary"]["range"]["low"], 100.0);
        assert_eq!(parsed["recommendation"]["list_price"]["amount"], 165.0);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_valuation("Lamp", &valuation(), false).unwrap();
        assert!(output.contains("$120.00 (market_data)"));
        assert!(output.contains("$100 - $150"));
        assert!(output.contains("high (14 data points)"));
        assert!(!output.contains("Analysis unavailable"));

        let with_narrative = formatter.format_valuation("Lamp", &valuation(), true).unwrap();
        assert!(with_narrative.ends_with("Analysis unavailable"));
    }

    #[test]
    fn test_batch_json_keeps_order_and_errors() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let report = BatchReport {
            results: vec![Ok(valuation()), Err(EngineError::Timeout(120))],
            metrics: BatchMetrics {
                succeeded: 1,
                timed_out: 1,
                ..BatchMetrics::new()
            },
        };
        let titles = vec!["Lamp".to_string(), "Clock".to_string()];

        let output = formatter.format_batch(&titles, &report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["items"][0]["title"], "Lamp");
        assert_eq!(parsed["items"][1]["title"], "Clock");
        assert!(parsed["items"][1]["error"].as_str().unwrap().contains("120"));
        assert_eq!(parsed["metrics"]["timed_out"], 1);
    }

    #[test]
    fn test_empty_batch_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report = BatchReport {
            results: Vec::new(),
            metrics: BatchMetrics::new(),
        };
        assert_eq!(formatter.format_batch(&[], &report).unwrap(), "No items to value.");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
