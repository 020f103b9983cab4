//! Per-event detail enrichment
//!
//! The orchestrator runs one detail fetch per extracted event, concurrently.
//! Implementations must not share mutable state between invocations.

use crate::model::Event;
use std::future::Future;

/// Enriches a single event with data from its detail page
pub trait DetailFetcher: Send + Sync + 'static {
    fn fetch_detail(&self, event: Event) -> impl Future<Output = Event> + Send;
}

/// Detail fetcher that returns the listing data unchanged
///
/// Detail pages are not fetched yet; this logs the event and hands it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoDetailFetcher;

impl DetailFetcher for EchoDetailFetcher {
    async fn fetch_detail(&self, event: Event) -> Event {
        tracing::info!("  * Event {}: {}", event.id, event.title);
        event
    }
}
