use std::path::PathBuf;

use anyhow::{ anyhow, Result };
use clap::{ Args, Parser, Subcommand };

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "claimcheck",
    about = "Checks natural-language claims against recent news coverage",
    version,
    author,
    long_about = None
)]
pub struct ClaimcheckCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the retrieval and embedding backends
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Article source (rss, newsapi, file)
    #[arg(short, long)]
    pub source: Option<String>,

    /// JSON file of articles to check against instead of a live source
    #[arg(short, long)]
    pub articles: Option<PathBuf>,

    /// Embedding method (tfidf, remote)
    #[arg(short, long)]
    pub embedding: Option<String>,

    /// Maximum number of articles to retrieve
    #[arg(short, long)]
    pub max_results: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a single claim against news coverage
    Check {
        /// The claim to check; prompts for one when omitted
        claim: Option<String>,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Check every claim in a file (one claim per line)
    Batch {
        /// Path to the claims file
        #[arg(long)]
        claims: PathBuf,

        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Show the search query extracted from a claim
    Keywords {
        /// The claim to reduce
        claim: String,
    },

    /// Print the effective configuration as YAML
    Config {
        /// Write the configuration to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow!("Unsupported output format: {}", format)),
    }
}
