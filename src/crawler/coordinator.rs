//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the page loop that drives a crawl:
//! - Loading each listing page through the document provider
//! - Extracting its events and pagination links
//! - Fanning out one detail task per event and joining them all
//! - Persisting the completed events
//! - Following the next-page link until pagination or the page limit ends

use crate::config::CrawlerConfig;
use crate::crawler::detail::DetailFetcher;
use crate::crawler::fetcher::{DocumentProvider, DocumentSource};
use crate::crawler::parser::ListingExtractor;
use crate::model::Event;
use crate::output::{CrawlStatistics, EventSink};
use crate::state::{CrawlCursor, CrawlState};
use crate::CrawlError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Main crawler coordinator structure
pub struct Coordinator<P, S, D> {
    provider: P,
    sink: S,
    detail: Arc<D>,
    extractor: ListingExtractor,
    cursor: CrawlCursor,
    limiter: Option<Arc<Semaphore>>,
    stats: CrawlStatistics,
}

impl<P, S, D> Coordinator<P, S, D>
where
    P: DocumentProvider,
    S: EventSink,
    D: DetailFetcher,
{
    /// Creates a coordinator positioned on the configured start page
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Fetch` if the start URL is not a usable source.
    pub fn new(config: &CrawlerConfig, provider: P, sink: S, detail: D) -> Result<Self, CrawlError> {
        let source = DocumentSource::parse(&config.start_url)?;

        let limiter = match config.max_concurrent_details {
            0 => None,
            permits => Some(Arc::new(Semaphore::new(permits as usize))),
        };

        Ok(Self {
            provider,
            sink,
            detail: Arc::new(detail),
            extractor: ListingExtractor::new(config.event_base_url.clone()),
            cursor: CrawlCursor::new(source, config.page_limit),
            limiter,
            stats: CrawlStatistics::new(),
        })
    }

    /// Current traversal position
    pub fn cursor(&self) -> &CrawlCursor {
        &self.cursor
    }

    /// The sink completed pages are written to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the coordinator and hands back its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs the page loop until pagination ends or the page limit is hit
    ///
    /// Each page is loaded, extracted, enriched by the detail fetcher and
    /// flushed to the sink before the next page is requested, so pages
    /// already persisted survive a later failure.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - Pages crawled, events found and persisted, field errors
    /// * `Err(CrawlError::Fetch)` - A listing page could not be loaded
    /// * `Err(CrawlError::Persistence)` - The sink failed to write or flush
    /// * `Err(CrawlError::DetailTask)` - A detail task panicked or went missing
    /// * `Err(CrawlError::InvalidTransition)` - The coordinator has already finished
    ///
    /// Field parse failures are only logged and counted.
    pub async fn run(&mut self) -> Result<CrawlStatistics, CrawlError> {
        if self.cursor.state().is_terminal() {
            return Err(CrawlError::InvalidTransition {
                from: self.cursor.state(),
                to: CrawlState::Fetching,
            });
        }

        let start_time = Instant::now();
        match self.cursor.limit() {
            0 => tracing::debug!("Crawling without a page limit"),
            limit => tracing::debug!("Crawling at most {} pages", limit),
        }

        loop {
            let source = self.cursor.source().clone();
            let page = self.cursor.page();
            tracing::info!("Fetching page {} ({})", page, source);

            // The parsed DOM is not Send, keep it out of any await point
            let listing = {
                let document = self.provider.load(&source).await?;
                self.cursor.transition(CrawlState::Extracting)?;
                self.extractor.extract(&document)
            };

            tracing::info!("Found {} events on page {}", listing.events.len(), page);
            self.stats
                .record_page(listing.events.len(), listing.field_errors);

            self.cursor.transition(CrawlState::Dispatching)?;
            let dispatched = listing.events.len();
            let tasks = self.dispatch(listing.events);

            self.cursor.transition(CrawlState::Collecting)?;
            let completed = self.collect(tasks, dispatched).await?;

            self.cursor.transition(CrawlState::Persisting)?;
            for event in &completed {
                self.sink.write_event(event)?;
            }
            self.sink.flush()?;
            self.stats.record_persisted(completed.len());

            self.cursor.transition(CrawlState::Advancing)?;
            let next = listing
                .next_page
                .as_deref()
                .and_then(|href| match source.resolve(href) {
                    Some(next) => Some(next),
                    None => {
                        tracing::warn!("Ignoring unusable next page link {:?}", href);
                        None
                    }
                });

            if !self.cursor.advance(next)? {
                break;
            }
        }

        self.stats.elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl completed: {} pages, {} events in {:?}",
            self.stats.pages_crawled,
            self.stats.events_persisted,
            self.stats.elapsed
        );

        Ok(self.stats.clone())
    }

    /// Spawns one detail task per event, tagged with its position on the page
    fn dispatch(&self, events: Vec<Event>) -> JoinSet<(usize, Event)> {
        let mut tasks = JoinSet::new();

        for (index, event) in events.into_iter().enumerate() {
            let detail = Arc::clone(&self.detail);
            let limiter = self.limiter.clone();

            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                tracing::debug!("Fetching detail for event {}", event.id);
                (index, detail.fetch_detail(event).await)
            });
        }

        tasks
    }

    /// Waits until every dispatched task has finished
    ///
    /// Results arrive in completion order; they are put back into page
    /// order so repeated crawls produce the same file.
    async fn collect(
        &self,
        mut tasks: JoinSet<(usize, Event)>,
        dispatched: usize,
    ) -> Result<Vec<Event>, CrawlError> {
        let page = self.cursor.page();
        let mut completed = Vec::with_capacity(dispatched);

        while let Some(result) = tasks.join_next().await {
            let entry = result.map_err(|e| CrawlError::DetailTask {
                page,
                message: e.to_string(),
            })?;
            completed.push(entry);
        }

        if completed.len() != dispatched {
            return Err(CrawlError::DetailTask {
                page,
                message: format!(
                    "expected {} detail results, got {}",
                    dispatched,
                    completed.len()
                ),
            });
        }

        completed.sort_by_key(|(index, _)| *index);
        Ok(completed.into_iter().map(|(_, event)| event).collect())
    }
}
