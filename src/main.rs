//! Tafsir-Harvest main entry point
//!
//! This is the command-line interface for the Tafsir-Harvest scraper.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tafsir_harvest::config::{load_config_with_hash, Config};
use tafsir_harvest::harvest;
use tafsir_harvest::output::{default_output_path, emit_document};
use tracing_subscriber::EnvFilter;

/// Tafsir-Harvest: scrape the chapter/verse commentary corpus into JSON
///
/// With no arguments the stock index is harvested and written to
/// `tafsir.json` next to the executable.
#[derive(Parser, Debug)]
#[command(name = "tafsir-harvest")]
#[command(version)]
#[command(about = "Scrape the tafsir corpus into a single JSON document", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the JSON here instead of the configured/default location
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let output_path = cli
        .output
        .or_else(|| config.output.path.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_output_path);

    let start_time = Instant::now();

    let document = match harvest(&config).await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Harvested {} chapters and {} verses in {:?}",
        document.len(),
        document.verse_count(),
        start_time.elapsed()
    );

    emit_document(&document, &output_path, config.output.echo && !cli.quiet)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tafsir_harvest=info,warn"),
            1 => EnvFilter::new("tafsir_harvest=debug,info"),
            2 => EnvFilter::new("tafsir_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
