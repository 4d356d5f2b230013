//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Appraise - value collectible items from market data.
#[derive(Debug, Parser)]
#[command(name = "appraise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "APPRAISAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON market fixture answering sold-listing and search queries
    #[arg(long, global = true, env = "APPRAISAL_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Enable the Ollama narrator with this model
    #[arg(long, global = true)]
    pub ollama_model: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Value a single item
    Value(ValueArgs),

    /// Value every item in a JSON file
    Batch(BatchArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the value command.
#[derive(Debug, Parser)]
pub struct ValueArgs {
    /// Auction title
    pub title: String,

    /// Item description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Image URL or path (repeatable)
    #[arg(short, long = "image")]
    pub images: Vec<String>,

    /// Current listing price, e.g. "$12.50 (3 bids)"
    #[arg(long)]
    pub current_price: Option<String>,

    /// Print the full narrative after the summary
    #[arg(long)]
    pub narrative: bool,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// JSON file holding an array of items
    pub file: PathBuf,

    /// Maximum items valued at once (overrides configuration)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_command() {
        let cli = Cli::parse_from([
            "appraise",
            "value",
            "Fenton Hobnail lamp",
            "--image",
            "https://img/1.jpg",
            "--image",
            "https://img/2.jpg",
            "--current-price",
            "$12.50 (3 bids)",
        ]);
        match cli.command {
            Command::Value(args) => {
                assert_eq!(args.title, "Fenton Hobnail lamp");
                assert_eq!(args.images.len(), 2);
                assert_eq!(args.current_price.as_deref(), Some("$12.50 (3 bids)"));
                assert!(!args.narrative);
            }
            _ => panic!("Expected Value command"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "appraise",
            "batch",
            "items.json",
            "--format",
            "json",
            "--fixture",
            "market.json",
            "-j",
            "2",
        ]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert_eq!(cli.fixture, Some(PathBuf::from("market.json")));
        match cli.command {
            Command::Batch(args) => assert_eq!(args.concurrency, Some(2)),
            _ => panic!("Expected Batch command"),
        }
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::parse_from(["appraise", "config", "--ollama-model", "llava"]);
        assert!(matches!(cli.command, Command::Config));
        assert_eq!(cli.ollama_model.as_deref(), Some("llava"));
    }
}
