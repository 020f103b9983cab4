//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the phase of the per-page cycle the orchestrator is in
//! - `CrawlCursor`: current listing page, page number and page limit

mod crawl_state;
mod cursor;

// Re-export main types
pub use crawl_state::CrawlState;
pub use cursor::CrawlCursor;
