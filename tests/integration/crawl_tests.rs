//! Integration tests for the crawler
//!
//! These tests run the full crawl cycle against saved listing pages on disk
//! and against a wiremock HTTP server.

use chrono::NaiveDate;
use gig_crawler::config::{Config, UserAgentConfig};
use gig_crawler::crawler::{
    crawl, DocumentProvider, DocumentSource, ListingExtractor, WebDocumentProvider,
};
use gig_crawler::{CrawlError, Event, FetchError, ZERO_TIME};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENT_BASE_URL: &str = "http://www.wegottickets.com/event/";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_body(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("Failed to read fixture")
}

/// Creates a crawl configuration writing into `out`
fn create_test_config(start: &str, out: &Path, limit: u32) -> Config {
    let mut config = Config::default();
    config.crawler.start_url = start.to_string();
    config.crawler.page_limit = limit;
    config.output.events_path = out.display().to_string();
    config
}

fn read_events(path: &Path) -> Vec<Event> {
    std::fs::read_to_string(path)
        .expect("Failed to read events file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect()
}

async fn load_fixture(name: &str) -> gig_crawler::crawler::Document {
    let provider = WebDocumentProvider::new(&UserAgentConfig::default()).unwrap();
    provider
        .load(&DocumentSource::Path(fixture(name)))
        .await
        .expect("Error fetching document")
}

#[tokio::test]
async fn test_extract_events_from_first_page() {
    let document = load_fixture("page-01.html").await;
    let listing = ListingExtractor::new(EVENT_BASE_URL).extract(&document);

    assert_eq!(listing.events.len(), 10);
    assert_eq!(listing.field_errors, 0);

    for event in &listing.events {
        assert!(!event.title.is_empty(), "missing title: {:?}", event);
        assert!(!event.link.is_empty(), "missing link: {:?}", event);
        assert!(event.price >= 0.0);
        assert!(!event.venue.is_empty(), "missing venue: {:?}", event);
        assert!(event.time.is_some(), "missing time: {:?}", event);
    }

    let first = &listing.events[0];
    assert_eq!(first.id, 300001);
    assert_eq!(first.title, "Stewart Lee");
    assert_eq!(first.price, 8.5);
    assert_eq!(first.venue, "LONDON: Leicester Square Theatre");
    assert_eq!(
        first.time,
        NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(19, 30, 0))
    );
}

#[tokio::test]
async fn test_last_page_keeps_partial_rows() {
    let document = load_fixture("page-02.html").await;
    let listing = ListingExtractor::new(EVENT_BASE_URL).extract(&document);

    assert_eq!(listing.events.len(), 3);
    assert_eq!(listing.field_errors, 1);

    let free = &listing.events[1];
    assert_eq!(free.id, 300012);
    assert_eq!(free.price, 0.0);
    assert!(free.time.is_some());

    let bare = &listing.events[2];
    assert_eq!(bare.id, 300013);
    assert_eq!(bare.link, "http://www.wegottickets.com/event/300013");
    assert!(bare.venue.is_empty());
    assert_eq!(bare.time, None);
    assert_eq!(bare.price, 12.0);
}

#[tokio::test]
async fn test_pagination_on_first_page() {
    let document = load_fixture("page-01.html").await;
    let listing = ListingExtractor::new(EVENT_BASE_URL).extract(&document);

    assert_eq!(listing.next_page.as_deref(), Some("page-02.html#paginate"));
    assert_eq!(listing.prev_page, None);
}

#[tokio::test]
async fn test_pagination_on_last_page() {
    let document = load_fixture("page-02.html").await;
    let listing = ListingExtractor::new(EVENT_BASE_URL).extract(&document);

    assert_eq!(listing.next_page, None);
    assert_eq!(listing.prev_page.as_deref(), Some("page-01.html#paginate"));
}

#[tokio::test]
async fn test_full_crawl_from_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("events.json");
    let start = fixture("page-01.html");

    let config = create_test_config(&start.display().to_string(), &out, 0);
    let stats = crawl(config).await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(stats.events_persisted, 13);
    assert_eq!(stats.field_errors, 1);

    let ids: Vec<i64> = read_events(&out).iter().map(|e| e.id).collect();
    assert_eq!(ids, (300001..=300013).collect::<Vec<_>>());

    // The row without venue details still carries a timestamp string
    let contents = std::fs::read_to_string(&out).unwrap();
    let last: serde_json::Value = serde_json::from_str(contents.lines().last().unwrap()).unwrap();
    assert_eq!(last["ID"], 300013);
    assert_eq!(last["Time"], ZERO_TIME);
}

#[tokio::test]
async fn test_page_limit_from_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("events.json");
    let start = fixture("page-01.html");

    let config = create_test_config(&start.display().to_string(), &out, 1);
    let stats = crawl(config).await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 1);
    assert_eq!(read_events(&out).len(), 10);
}

#[tokio::test]
async fn test_second_run_appends() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("events.json");
    let start = fixture("page-01.html").display().to_string();

    crawl(create_test_config(&start, &out, 1)).await.unwrap();
    crawl(create_test_config(&start, &out, 1)).await.unwrap();

    let events = read_events(&out);
    assert_eq!(events.len(), 20);
    assert_eq!(events[0], events[10]);
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let first = fixture_body("page-01.html").replace(
        "page-02.html#paginate",
        &format!("{}/searchresults/page/2/latest#paginate", base_url),
    );

    Mock::given(method("GET"))
        .and(path("/searchresults/page/1/latest"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(first)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/searchresults/page/2/latest"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(fixture_body("page-02.html"))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("events.json");
    let start = format!("{}/searchresults/page/1/latest", base_url);

    let stats = crawl(create_test_config(&start, &out, 0))
        .await
        .expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(read_events(&out).len(), 13);
}

#[tokio::test]
async fn test_fetch_failure_aborts_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let first = fixture_body("page-01.html").replace(
        "page-02.html#paginate",
        &format!("{}/searchresults/page/2/latest", base_url),
    );

    Mock::given(method("GET"))
        .and(path("/searchresults/page/1/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_string(first))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/searchresults/page/2/latest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("events.json");
    let start = format!("{}/searchresults/page/1/latest", base_url);

    let result = crawl(create_test_config(&start, &out, 0)).await;

    match result {
        Err(CrawlError::Fetch(FetchError::Status { status, url })) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/searchresults/page/2/latest"));
        }
        other => panic!("Expected fetch failure, got {:?}", other),
    }

    // Page 1 was persisted before page 2 failed
    assert_eq!(read_events(&out).len(), 10);
}

#[tokio::test]
async fn test_missing_start_file_aborts_crawl() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("events.json");
    let start = dir.path().join("no-such-page.html");

    let result = crawl(create_test_config(&start.display().to_string(), &out, 0)).await;

    assert!(matches!(
        result,
        Err(CrawlError::Fetch(FetchError::Io { .. }))
    ));
}

#[tokio::test]
async fn test_unwritable_output_aborts_crawl() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("missing-dir").join("events.json");
    let start = fixture("page-01.html");

    let result = crawl(create_test_config(&start.display().to_string(), &out, 0)).await;

    assert!(matches!(result, Err(CrawlError::Persistence(_))));
}
