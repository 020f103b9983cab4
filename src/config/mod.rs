//! Configuration module for Gig-Crawler
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual values afterwards.
//!
//! # Example
//!
//! ```no_run
//! use gig_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Page limit: {}", config.crawler.page_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_EVENTS_PATH,
    DEFAULT_EVENT_BASE_URL, DEFAULT_START_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
