use serde::Deserialize;

/// Default first listing page
pub const DEFAULT_START_URL: &str = "http://www.wegottickets.com/searchresults/region/0/latest";

/// Prefix every event detail link starts with; the remainder is the event id
pub const DEFAULT_EVENT_BASE_URL: &str = "http://www.wegottickets.com/event/";

/// Default output file for event records
pub const DEFAULT_EVENTS_PATH: &str = "./events.json";

/// Main configuration structure for Gig-Crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Listing page (URL or local path) the crawl starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum number of listing pages to crawl (0 = no limit)
    #[serde(rename = "page-limit")]
    pub page_limit: u32,

    /// Maximum number of detail fetches in flight per page (0 = one per event)
    #[serde(rename = "max-concurrent-details")]
    pub max_concurrent_details: u32,

    /// Base URL stripped from detail links to derive event ids
    #[serde(rename = "event-base-url")]
    pub event_base_url: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            page_limit: 0,
            max_concurrent_details: 0,
            event_base_url: DEFAULT_EVENT_BASE_URL.to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Overall request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the newline-delimited JSON events file
    #[serde(rename = "events-path")]
    pub events_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            events_path: DEFAULT_EVENTS_PATH.to_string(),
        }
    }
}
