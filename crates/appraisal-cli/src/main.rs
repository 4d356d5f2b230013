//! Appraise - value collectible items from market data.

use appraisal_cli::commands::{self, build_orchestrator, effective_narrator, load_market};
use appraisal_cli::{AppConfig, Cli, Command, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    // Logs go to stderr so JSON output on stdout stays clean
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> appraisal_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.narrator = effective_narrator(&config.narrator, cli.ollama_model.as_deref());
    if let Command::Batch(args) = &cli.command {
        if let Some(concurrency) = args.concurrency {
            config.engine.max_concurrent_items = concurrency;
        }
    }
    config.validate()?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let formatter = Formatter::new(format, !cli.no_color && config.output.color);

    match cli.command {
        Command::Config => commands::execute_config(&config)?,
        Command::Value(args) => {
            let orchestrator = build_orchestrator(&config, load_market(cli.fixture.as_deref())?)?;
            commands::execute_value(args, &orchestrator, &formatter).await?;
        }
        Command::Batch(args) => {
            let orchestrator = build_orchestrator(&config, load_market(cli.fixture.as_deref())?)?;
            commands::execute_batch(args, orchestrator, &formatter).await?;
        }
    }

    Ok(())
}
