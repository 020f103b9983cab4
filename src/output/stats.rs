//! Crawl statistics
//!
//! Counters collected by the orchestrator while it walks the listing pages.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Listing pages fetched and processed
    pub pages_crawled: u32,

    /// Event rows found across all pages
    pub events_found: u64,

    /// Events written to the sink
    pub events_persisted: u64,

    /// Fields that failed to parse and were left at their zero value
    pub field_errors: u64,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one processed listing page
    pub fn record_page(&mut self, events: usize, field_errors: usize) {
        self.pages_crawled += 1;
        self.events_found += events as u64;
        self.field_errors += field_errors as u64;
    }

    pub fn record_persisted(&mut self, events: usize) {
        self.events_persisted += events as u64;
    }

    /// Average number of events per page
    pub fn events_per_page(&self) -> f64 {
        if self.pages_crawled == 0 {
            return 0.0;
        }
        self.events_found as f64 / self.pages_crawled as f64
    }
}

/// Prints statistics in a human-readable format
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");
    println!("Pages crawled:    {}", stats.pages_crawled);
    println!("Events found:     {}", stats.events_found);
    println!("Events persisted: {}", stats.events_persisted);
    println!("Field errors:     {}", stats.field_errors);
    println!("Events per page:  {:.2}", stats.events_per_page());
    println!("Elapsed:          {:.2?}", stats.elapsed);
}
