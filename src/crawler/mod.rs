//! Crawler module for listing pages and their events
//!
//! This module contains the core crawling logic, including:
//! - Loading listing documents from the web or from disk
//! - Extracting event rows and pagination links
//! - Parsing price, time and id fields
//! - Per-event detail enrichment
//! - Overall crawl coordination

mod coordinator;
mod detail;
mod fetcher;
mod fields;
mod parser;

pub use coordinator::Coordinator;
pub use detail::{DetailFetcher, EchoDetailFetcher};
pub use fetcher::{
    build_http_client, Document, DocumentProvider, DocumentSource, WebDocumentProvider,
};
pub use fields::{parse_id, parse_price, parse_time, TIME_FORMAT};
pub use parser::{ListingExtractor, ListingPage, VenueDetails};

use crate::config::Config;
use crate::output::{CrawlStatistics, JsonLinesSink};
use crate::CrawlError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open (or create) the events file for appending
/// 2. Build the HTTP client
/// 3. Walk the listing pages from the configured start URL
/// 4. Append every extracted event to the events file
///
/// # Example
///
/// ```no_run
/// use gig_crawler::config::Config;
/// use gig_crawler::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = crawl(Config::default()).await?;
/// println!("{} events", stats.events_persisted);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<CrawlStatistics, CrawlError> {
    let sink = JsonLinesSink::open(Path::new(&config.output.events_path))?;
    let provider = WebDocumentProvider::new(&config.user_agent)?;

    let mut coordinator = Coordinator::new(&config.crawler, provider, sink, EchoDetailFetcher)?;
    let stats = coordinator.run().await?;

    let sink = coordinator.sink();
    tracing::info!(
        "Appended {} events to {}",
        sink.written(),
        sink.path().display()
    );

    Ok(stats)
}
