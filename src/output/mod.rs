//! Output module for persisting crawled events
//!
//! This module handles:
//! - The event sink interface the crawl loop writes through
//! - Appending events to a newline-delimited JSON file
//! - Recording crawl statistics

mod jsonl;
pub mod stats;
mod traits;

pub use jsonl::JsonLinesSink;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{EventSink, PersistenceError, PersistenceResult};
