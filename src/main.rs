use std::str::FromStr;

use anyhow::{ anyhow, Result };
use clap::Parser;
use log::{ debug, info };

use claimcheck::{ CheckerConfig, ClaimChecker, EmbeddingMethod, KeywordExtractor, SourceKind };

mod cli;
use cli::{ BackendArgs, ClaimcheckCli, Commands };

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = ClaimcheckCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    // API keys may live in a local .env file
    if dotenv::dotenv().is_ok() {
        debug!("Loaded environment from .env");
    }

    let output_format = cli::parse_output_format(&cli.output_format)?;
    let mut config = CheckerConfig::load(cli.config.as_deref())?;

    // Handle commands
    match &cli.command {
        Commands::Check { claim, backend } => {
            apply_overrides(&mut config, backend)?;
            let checker = ClaimChecker::from_config(&config)?;
            cli::commands::check::execute(&checker, claim.as_deref(), output_format).await?;
        }

        Commands::Batch { claims, backend } => {
            apply_overrides(&mut config, backend)?;
            let checker = ClaimChecker::from_config(&config)?;
            cli::commands::batch::execute(&checker, claims, output_format).await?;
        }

        Commands::Keywords { claim } => {
            let extractor = KeywordExtractor::new(config.keywords.clone());
            cli::commands::keywords::execute(&extractor, claim, output_format)?;
        }

        Commands::Config { output } => {
            cli::commands::config::execute(&config, output.as_deref())?;
        }
    }

    Ok(())
}

/// Apply command line backend selections on top of the loaded configuration
fn apply_overrides(config: &mut CheckerConfig, backend: &BackendArgs) -> Result<()> {
    if let Some(source) = &backend.source {
        config.retriever.source = SourceKind::from_str(source).map_err(|e| anyhow!(e))?;
    }
    if let Some(articles) = &backend.articles {
        config.retriever.articles_file = Some(articles.clone());
        // an evidence file implies the file source unless another was named
        if backend.source.is_none() {
            config.retriever.source = SourceKind::File;
        }
    }
    if let Some(embedding) = &backend.embedding {
        config.embedding.method = EmbeddingMethod::from_str(embedding).map_err(|e| anyhow!(e))?;
    }
    if let Some(max_results) = backend.max_results {
        config.retriever.max_results = max_results;
    }
    config.validate()?;
    info!(
        "Using {} source with {} embeddings",
        config.retriever.source,
        config.embedding.method
    );
    Ok(())
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
