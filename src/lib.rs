//! Gig-Crawler: a paginated event-listing crawler
//!
//! This crate walks the search-result pages of an event-listing site, extracts
//! one record per listed event, enriches each record concurrently and appends
//! the results to a newline-delimited JSON file.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Gig-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] output::PersistenceError),

    #[error("Detail task failed on page {page}: {message}")]
    DetailTask { page: u32, message: String },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Errors raised while loading a listing document. Always fatal to the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid document source: {0}")]
    InvalidSource(String),
}

impl FetchError {
    /// Returns true if a retry policy could reasonably try this fetch again.
    ///
    /// The crawler itself never retries; this is the hook a retrying
    /// `DocumentProvider` wrapper would consult.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Io { .. } | Self::InvalidSource(_) => false,
        }
    }
}

/// Per-field extraction failures. Never fatal: the field keeps its zero value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Can not find price value in {raw:?}")]
    Price { raw: String },

    #[error("Can not find time value in {raw:?}")]
    Time { raw: String },

    #[error("Can not find id value in {raw:?}")]
    Id { raw: String },
}

impl ParseError {
    /// The raw text that failed to parse
    pub fn raw(&self) -> &str {
        match self {
            Self::Price { raw } | Self::Time { raw } | Self::Id { raw } => raw,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Gig-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, DocumentSource};
pub use model::{Event, ZERO_TIME};
pub use output::CrawlStatistics;
pub use state::{CrawlCursor, CrawlState};
