//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full walk (network, cache directory, index) end-to-end.

use catechism::cache::CacheStore;
use catechism::config::{CacheConfig, Config, HttpConfig, PositionConfig, SourceConfig};
use catechism::crawler::{crawl, Fetcher, HttpFetcher, PaginationWalker};
use catechism::url::UrlResolver;
use catechism::CatechismError;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARCHIVE_ROOT: &str = "/archive/ENG0015";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, cache_dir: &Path) -> Config {
    Config {
        source: SourceConfig {
            base_url: base_url.to_string(),
            archive_root: ARCHIVE_ROOT.to_string(),
            first_page: "__P1.HTM".to_string(),
        },
        cache: CacheConfig {
            directory: cache_dir.display().to_string(),
        },
        http: HttpConfig {
            user_agent: "TestReader/1.0".to_string(),
            timeout_secs: 5,
            max_retries: 0,
            retry_delay_ms: 10,
        },
        position: PositionConfig::default(),
    }
}

/// Mounts an HTML page under the archive root
async fn mount_page(server: &MockServer, name: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{}/{}", ARCHIVE_ROOT, name)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_two_page_document_end_to_end() {
    let mock_server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "__P1.HTM",
        r#"<html><body>
            <p>Prologue</p>
            <p>1 God, infinitely perfect and blessed in himself</p>
            <p>2 So that this call should resound throughout the world</p>
            <a href="__P2.HTM">Next</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "__P2.HTM",
        r#"<html><body>
            <p>3 Those who with God's help have welcomed Christ's call</p>
            <a href="__P1.HTM">Previous</a>
        </body></html>"#,
    )
    .await;

    let config = create_test_config(&mock_server.uri(), cache_dir.path());

    // Cold cache: every page comes from the server
    let report = crawl(&config).await.unwrap();
    assert_eq!(report.index.len(), 3);
    assert_eq!(report.stats.pages_visited, 2);
    assert_eq!(report.stats.network_fetches, 2);
    assert_eq!(request_count(&mock_server).await, 2);

    assert!(cache_dir.path().join("_archive_ENG0015___P1.HTM").exists());
    assert!(cache_dir.path().join("_archive_ENG0015___P2.HTM").exists());

    // Warm cache: the same index without touching the network
    let report = crawl(&config).await.unwrap();
    assert_eq!(report.index.len(), 3);
    assert_eq!(report.stats.network_fetches, 0);
    assert_eq!(report.stats.cache_hits, 2);
    assert_eq!(request_count(&mock_server).await, 2);

    let numbers: Vec<u32> = report.index.paragraphs().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(
        report.index.lookup(3).unwrap().text,
        "3 Those who with God's help have welcomed Christ's call"
    );
}

#[tokio::test]
async fn test_three_page_chain_halts_after_last_page() {
    let mock_server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(&mock_server, "__P1.HTM", r#"<p>1 one</p><a href="__P2.HTM">Next</a>"#).await;
    mount_page(
        &mock_server,
        "__P2.HTM",
        &format!(
            r#"<p>2 two</p><a href="{}{}/__P3.HTM">Next</a>"#,
            mock_server.uri(),
            ARCHIVE_ROOT
        ),
    )
    .await;
    mount_page(&mock_server, "__P3.HTM", r#"<p>3 three</p><a href="__P4.HTM">next</a>"#).await;

    let config = create_test_config(&mock_server.uri(), cache_dir.path());
    let report = crawl(&config).await.unwrap();

    let requested: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();

    assert_eq!(
        requested,
        vec![
            "/archive/ENG0015/__P1.HTM",
            "/archive/ENG0015/__P2.HTM",
            "/archive/ENG0015/__P3.HTM",
        ]
    );
    assert_eq!(report.index.len(), 3);
}

#[tokio::test]
async fn test_cached_response_is_byte_identical() {
    let mock_server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(&mock_server, "__P1.HTM", "<p>1 only page</p>").await;

    let resolver = UrlResolver::new(&mock_server.uri(), ARCHIVE_ROOT).unwrap();
    let url = resolver.resolve("__P1.HTM").unwrap();
    let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
    let store = CacheStore::new(cache_dir.path(), fetcher);

    let first = store.fetch_cached(&url).await.unwrap();
    let second = store.fetch_cached(&url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.network_fetches(), 1);
    assert_eq!(store.cache_hits(), 1);
    assert_eq!(request_count(&mock_server).await, 1);

    let on_disk = std::fs::read(store.path_for(&url)).unwrap();
    assert_eq!(on_disk, first);
    let text = String::from_utf8(on_disk).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.ends_with("\r\n\r\n<p>1 only page</p>"));
}

#[tokio::test]
async fn test_missing_page_is_cached_and_ends_walk() {
    let mock_server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "__P1.HTM",
        r#"<p>1 one</p><p>2 two</p><a href="__P2.HTM">Next</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/archive/ENG0015/__P2.HTM"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not found</p>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), cache_dir.path());
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.index.len(), 2);
    assert_eq!(report.stats.pages_visited, 2);

    let entry = cache_dir.path().join("_archive_ENG0015___P2.HTM");
    let text = String::from_utf8(std::fs::read(entry).unwrap()).unwrap();
    assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(text.ends_with("\r\n\r\n<p>Not found</p>"));

    // The error page is served from the cache on the next run
    crawl(&config).await.unwrap();
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test]
async fn test_server_error_page_is_not_retried() {
    let mock_server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/archive/ENG0015/__P1.HTM"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), cache_dir.path());
    config.http.max_retries = 2;
    let report = crawl(&config).await.unwrap();

    assert!(report.index.is_empty());
    assert!(cache_dir.path().join("_archive_ENG0015___P1.HTM").exists());
}

#[tokio::test]
async fn test_unreachable_server_is_fatal() {
    let cache_dir = TempDir::new().unwrap();

    // Nothing listens on the discard port of the loopback address
    let config = create_test_config("http://127.0.0.1:9", cache_dir.path());
    let result = crawl(&config).await;

    assert!(matches!(result, Err(CatechismError::Fetch { .. })));
    assert!(!cache_dir.path().join("_archive_ENG0015___P1.HTM").exists());
}

#[tokio::test]
async fn test_fetcher_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/archive/ENG0015/__P1.HTM"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>1 slow</p>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpConfig {
        user_agent: "TestReader/1.0".to_string(),
        timeout_secs: 1,
        max_retries: 1,
        retry_delay_ms: 10,
    };
    let fetcher = HttpFetcher::new(&config).unwrap();
    let url = UrlResolver::new(&mock_server.uri(), ARCHIVE_ROOT)
        .unwrap()
        .resolve("__P1.HTM")
        .unwrap();

    let result = fetcher.fetch(&url).await;

    assert!(matches!(result, Err(CatechismError::Fetch { .. })));
    // One retry after the first timeout
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test]
async fn test_walker_over_shared_store() {
    let mock_server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "__P1.HTM",
        r#"<p>10 first</p><a href="/archive/ENG0015/__P2.HTM">Next</a>"#,
    )
    .await;
    mount_page(&mock_server, "__P2.HTM", r#"<p>10 second</p><p>11 eleven</p>"#).await;

    let resolver = UrlResolver::new(&mock_server.uri(), ARCHIVE_ROOT).unwrap();
    let first_page = resolver.resolve("__P1.HTM").unwrap();
    let store = CacheStore::new(
        cache_dir.path(),
        HttpFetcher::new(&HttpConfig::default()).unwrap(),
    );

    let report = PaginationWalker::new(&store, &resolver, first_page)
        .walk()
        .await
        .unwrap();

    assert_eq!(report.index.len(), 2);
    assert_eq!(report.index.lookup(10).unwrap().text, "10 first");
    assert_eq!(report.stats.duplicates_skipped, 1);
}
