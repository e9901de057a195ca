//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! HTTP fetcher through full generations, then persist the results.

use sitescrape::config::{CrawlConfig, OutputTargets};
use sitescrape::crawler::{scrape_until, Crawler};
use sitescrape::output::persist_all;
use sitescrape::storage::SqliteStorage;
use sitescrape::{SinkError, UrlState};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration scoped to the mock server
fn create_test_config(server: &MockServer, cycle_limit: u32) -> CrawlConfig {
    let base_url = server.uri();

    // Extract host from base_url (e.g., "127.0.0.1" from "http://127.0.0.1:12345")
    let domain = url::Url::parse(&base_url)
        .expect("Failed to parse base URL")
        .host_str()
        .expect("Failed to extract host")
        .to_string();

    CrawlConfig::new("mock", &format!("{}/", base_url), Some(domain), Some(base_url))
        .expect("valid test config")
        .with_cycle_limit(cycle_limit)
        .with_backoff(Duration::ZERO)
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Serves a home page linking to an about page, a missing page, an
/// off-site page, and an empty anchor
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <p>Welcome to the   site!</p>
            <p>Second para.</p>
            <a href="/about">About</a>
            <a href="/missing">Missing</a>
            <a href="https://other.org/x">Elsewhere</a>
            <a href="">Nowhere</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        server,
        "/about",
        r#"<html><body>
            <p>About us.</p>
            <a href="/about">Self</a>
            <a href="/">Home</a>
        </body></html>"#
            .to_string(),
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = create_test_config(&server, 3);
    let seed = config.start_url.clone();
    let mut crawler = Crawler::new(config).unwrap();

    let summary = crawler.run().await;

    let records = crawler.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, seed);
    assert_eq!(records[0].text, "Welcome to the site Second para");
    assert_eq!(records[1].url, "/about");
    assert_eq!(records[1].text, "About us");
    assert!(records.iter().all(|r| r.source == "mock"));

    assert_eq!(summary.generations, 3);
    assert_eq!(summary.records, 2);
    // "/missing" answered 404
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.transient_failures, 0);
    // "", "https://other.org/x", and "/" in the last generation
    assert_eq!(summary.rejected, 3);
    assert_eq!(summary.visited, 6);
    assert!(summary.frontier_exhausted);

    let frontier = crawler.frontier();
    assert!(frontier.is_disjoint());
    assert_eq!(frontier.state_of("/missing"), Some(UrlState::Visited));
    assert_eq!(frontier.state_of(&seed), Some(UrlState::Visited));
}

#[tokio::test]
async fn test_off_site_links_never_requested() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let mut crawler = Crawler::new(create_test_config(&server, 3)).unwrap();
    crawler.run().await;

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths, vec!["/", "/about", "/missing"]);
}

#[tokio::test]
async fn test_cycle_limit_stops_crawl() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let mut crawler = Crawler::new(create_test_config(&server, 1)).unwrap();
    let summary = crawler.run().await;

    assert_eq!(summary.generations, 1);
    assert_eq!(summary.records, 1);
    assert_eq!(summary.queued, 4);
    assert!(!summary.frontier_exhausted);
}

#[tokio::test]
async fn test_crawl_persists_to_every_sink() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let targets = OutputTargets {
        json: Some(dir.path().join("scrape.json")),
        tsv: Some(dir.path().join("scrape.tsv")),
        db: Some(dir.path().join("scrape.db")),
    };

    let mut crawler = Crawler::new(create_test_config(&server, 3)).unwrap();
    let (summary, outcomes) =
        scrape_until(&mut crawler, &targets, std::future::pending::<()>())
            .await
            .unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| matches!(o.result, Ok(2))));

    let json = std::fs::read_to_string(dir.path().join("scrape.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["text"], "About us");

    let tsv = std::fs::read_to_string(dir.path().join("scrape.tsv")).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "timestamp\tsource\turl\ttext");
    assert!(lines[2].ends_with("\tmock\t/about\tAbout us"));

    let storage = SqliteStorage::open(&dir.path().join("scrape.db")).unwrap();
    assert_eq!(storage.count_rows().unwrap(), 2);

    // Second save: files are never overwritten, duplicate rows are ignored
    let outcomes = persist_all(crawler.records(), &targets);
    assert!(matches!(outcomes[0].result, Err(SinkError::AlreadyExists(_))));
    assert!(matches!(outcomes[1].result, Err(SinkError::AlreadyExists(_))));
    assert!(matches!(outcomes[2].result, Ok(0)));
    assert_eq!(storage.count_rows().unwrap(), 2);
}

#[tokio::test]
async fn test_failed_seed_leaves_nothing_to_save() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("scrape.json");
    let targets = OutputTargets {
        json: Some(json.clone()),
        ..OutputTargets::default()
    };

    let mut crawler = Crawler::new(create_test_config(&server, 3)).unwrap();
    let (summary, outcomes) =
        scrape_until(&mut crawler, &targets, std::future::pending::<()>())
            .await
            .unwrap();

    assert_eq!(summary.generations, 1);
    assert_eq!(summary.failures, 1);
    assert!(summary.frontier_exhausted);
    assert!(matches!(outcomes[0].result, Err(SinkError::NoRecords)));
    assert!(!json.exists());
}

#[tokio::test]
async fn test_unreachable_seed_is_transient() {
    // Nothing listens on the discard port
    let config = CrawlConfig::new(
        "mock",
        "http://127.0.0.1:9/",
        Some("127.0.0.1".to_string()),
        Some("http://127.0.0.1:9".to_string()),
    )
    .unwrap()
    .with_backoff(Duration::ZERO);

    let mut crawler = Crawler::new(config).unwrap();
    let summary = crawler.run().await;

    assert_eq!(summary.transient_failures, 1);
    assert_eq!(summary.records, 0);
    assert_eq!(summary.visited, 1);
    assert!(summary.frontier_exhausted);
}
