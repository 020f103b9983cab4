//! Gig-Crawler main entry point
//!
//! This is the command-line interface for the Gig-Crawler event crawler.

use anyhow::Context;
use clap::Parser;
use gig_crawler::config::{load_config_with_hash, validate, Config};
use gig_crawler::crawler::crawl;
use gig_crawler::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gig-Crawler: crawls paginated event listings into a JSON lines file
///
/// Starting from a search-result page, Gig-Crawler follows the "next page"
/// links, extracts every listed event and appends one JSON object per
/// event to the output file.
#[derive(Parser, Debug)]
#[command(name = "gig-crawler")]
#[command(version)]
#[command(about = "Crawls paginated event listings", long_about = None)]
struct Cli {
    /// The search result URL (or saved HTML file) to start from
    #[arg(long)]
    url: Option<String>,

    /// The output path the crawler will append events to
    #[arg(long)]
    out: Option<PathBuf>,

    /// The limit of pages the crawler will fetch (0 = no limit)
    #[arg(long)]
    limit: Option<u32>,

    /// Maximum detail fetches in flight per page (0 = one per event)
    #[arg(long)]
    max_concurrent_details: Option<u32>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

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

    let config = build_config(&cli)?;

    tracing::info!(
        "Crawling from {} into {} (page limit: {})",
        config.crawler.start_url,
        config.output.events_path,
        config.crawler.page_limit
    );

    match crawl(config).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            if !cli.quiet {
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error on crawling: {}", e);
            Err(e).context("crawl failed")
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gig_crawler=info,warn"),
            1 => EnvFilter::new("gig_crawler=debug,info"),
            2 => EnvFilter::new("gig_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.crawler.start_url = url.clone();
    }
    if let Some(out) = &cli.out {
        config.output.events_path = out.display().to_string();
    }
    if let Some(limit) = cli.limit {
        config.crawler.page_limit = limit;
    }
    if let Some(max) = cli.max_concurrent_details {
        config.crawler.max_concurrent_details = max;
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}
