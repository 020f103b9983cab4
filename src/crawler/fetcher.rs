//! Listing document loading
//!
//! This module resolves a [`DocumentSource`] (a web URL or a local HTML file)
//! into a parsed [`Document`]. It handles:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests for listing pages
//! - Reading saved pages from disk
//! - Resolving pagination links against the page they were found on

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::Client;
use scraper::Html;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Where a listing document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// An http or https page
    Url(Url),

    /// A saved HTML file
    Path(PathBuf),
}

impl DocumentSource {
    /// Interprets a user-supplied string as a URL or a local path
    ///
    /// `http`/`https` URLs become [`DocumentSource::Url`], `file://` URLs and
    /// anything else that is not a URL become [`DocumentSource::Path`].
    pub fn parse(source: &str) -> Result<Self, FetchError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(FetchError::InvalidSource(
                "document source cannot be empty".to_string(),
            ));
        }

        match Url::parse(source) {
            Ok(url) if is_web_url(&url) => Ok(Self::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Path)
                .map_err(|_| FetchError::InvalidSource(source.to_string())),
            _ => Ok(Self::Path(PathBuf::from(source))),
        }
    }

    /// Resolves a link found in this document into the source it points to
    ///
    /// Absolute web links are taken as-is. Relative links are joined onto the
    /// page URL, or onto the file's directory for local documents (dropping
    /// any query or fragment). Returns None for empty or non-web links.
    pub fn resolve(&self, href: &str) -> Option<Self> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        if let Ok(url) = Url::parse(href) {
            return is_web_url(&url).then_some(Self::Url(url));
        }

        match self {
            Self::Url(base) => base
                .join(href)
                .ok()
                .filter(is_web_url)
                .map(Self::Url),
            Self::Path(path) => {
                let relative = href.split(['#', '?']).next().unwrap_or_default();
                if relative.is_empty() {
                    return None;
                }
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                Some(Self::Path(dir.join(relative)))
            }
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_web_url(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}

/// A parsed listing document
pub struct Document {
    source: DocumentSource,
    html: Html,
}

impl Document {
    /// Parses raw HTML loaded from `source`
    pub fn parse(source: DocumentSource, body: &str) -> Self {
        Self {
            source,
            html: Html::parse_document(body),
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Parsed DOM, not `Send`; extract from it before awaiting
    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Resolves a source to a parsed document
///
/// Any error is fatal to the crawl. Implementations wanting retries should
/// wrap another provider and consult [`FetchError::is_retryable`].
pub trait DocumentProvider {
    fn load(
        &self,
        source: &DocumentSource,
    ) -> impl Future<Output = Result<Document, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// The user agent is formatted as `CrawlerName/Version`.
///
/// # Example
///
/// ```no_run
/// use gig_crawler::config::UserAgentConfig;
/// use gig_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Document provider backed by HTTP for URLs and the filesystem for paths
#[derive(Debug, Clone)]
pub struct WebDocumentProvider {
    client: Client,
}

impl WebDocumentProvider {
    /// Creates a provider with a client built from the user agent config
    pub fn new(config: &UserAgentConfig) -> Result<Self, FetchError> {
        let client = build_http_client(config).map_err(|source| FetchError::Http {
            url: "<client setup>".to_string(),
            source,
        })?;
        Ok(Self::with_client(client))
    }

    /// Creates a provider around an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a page body, treating any non-2xx status as a failure
    async fn fetch_url(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

impl DocumentProvider for WebDocumentProvider {
    async fn load(&self, source: &DocumentSource) -> Result<Document, FetchError> {
        let body = match source {
            DocumentSource::Url(url) => self.fetch_url(url).await?,
            DocumentSource::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FetchError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        tracing::debug!("Loaded {} bytes from {}", body.len(), source);
        Ok(Document::parse(source.clone(), &body))
    }
}
