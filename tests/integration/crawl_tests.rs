//! Integration tests for the crawler
//!
//! These tests use wiremock to serve pages over HTTP and run the full crawl
//! through the default HTTP page parser.

use ripple_words::config::{load_config, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use ripple_words::crawler::crawl;
use ripple_words::output::write_result_json;
use ripple_words::CrawlResult;
use std::collections::HashMap;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from the given seeds
fn create_test_config(seeds: Vec<String>, max_depth: u32, ignored_urls: Vec<String>) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_pages: seeds,
            ignored_urls,
            ignored_words: vec![],
            max_depth,
            timeout_seconds: 30,
            parallelism: 4,
            popular_word_count: 100,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig::default(),
    }
}

/// An HTML response with the given body
fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// Runs the blocking crawl off the async test thread
async fn run_crawl(config: Config) -> CrawlResult {
    tokio::task::spawn_blocking(move || crawl(&config))
        .await
        .expect("Crawl thread panicked")
        .expect("Crawl failed")
}

async fn mount_page(server: &MockServer, route: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_crawl_counts_words() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            Rust crawler home
            <a href="{}/page1">Page</a>
            <a href="/page2">Page</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        "<html><body>rust rust words</body></html>".to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/page2",
        "<html><body>Words, more words.</body></html>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(vec![format!("{}/", base_url)], 2, vec![]);
    let result = run_crawl(config).await;

    assert_eq!(result.urls_visited, 3);
    let counts = result.word_count_map();
    assert_eq!(counts.get("rust"), Some(&3));
    assert_eq!(counts.get("words"), Some(&3));
    assert_eq!(counts.get("page"), Some(&2));
    assert_eq!(counts.get("crawler"), Some(&1));
    // title text sits outside the body
    assert_eq!(counts.get("home"), Some(&1));
    // ranked: highest count first
    assert_eq!(result.word_counts[0].1, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Chain: / -> level1 -> level2 -> level3
    for (route, next) in [("/", "level1"), ("/level1", "level2"), ("/level2", "level3")] {
        mount_page(
            &mock_server,
            route,
            format!(r#"<html><body><a href="{}/{}">next</a></body></html>"#, base_url, next),
            1,
        )
        .await;
    }

    // level3 arrives with no depth left
    mount_page(
        &mock_server,
        "/level3",
        "<html><body>too deep</body></html>".to_string(),
        0,
    )
    .await;

    let config = create_test_config(vec![format!("{}/", base_url)], 3, vec![]);
    let result = run_crawl(config).await;

    assert_eq!(result.urls_visited, 3);
    assert_eq!(result.word_count_map().get("next"), Some(&3));
    assert!(!result.word_count_map().contains_key("deep"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ignored_urls_are_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{}/allowed">Allowed</a>
            <a href="{}/admin">Admin</a>
            </body></html>"#,
            base_url, base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/allowed",
        "<html><body>allowed content</body></html>".to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/admin",
        "<html><body>secret content</body></html>".to_string(),
        0,
    )
    .await;

    let config = create_test_config(
        vec![format!("{}/", base_url)],
        3,
        vec![".*/admin".to_string()],
    );
    let result = run_crawl(config).await;

    assert_eq!(result.urls_visited, 2);
    assert!(!result.word_count_map().contains_key("secret"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_pages_are_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{base}/document.pdf">pdf</a>
            <a href="{base}/missing">missing</a>
            <a href="{base}/error">error</a>
            <a href="{base}/good">good</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/document.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x25, 0x50, 0x44, 0x46], "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/good",
        "<html><body>survivor</body></html>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(vec![format!("{}/", base_url)], 2, vec![]);
    let result = run_crawl(config).await;

    // failures are still claimed, they just contribute nothing
    assert_eq!(result.urls_visited, 5);
    let counts = result.word_count_map();
    assert_eq!(counts.get("survivor"), Some(&1));
    assert_eq!(counts.get("pdf"), Some(&1));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repeated_links_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{base}/">self</a>
            <a href="{base}/a">a</a>
            <a href="{base}/b">b</a>
            <a href="{base}/a#again">a</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        format!(r#"<html><body><a href="{}/b">b</a></body></html>"#, base_url),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/b",
        format!(r#"<html><body><a href="{}/a">a</a></body></html>"#, base_url),
        1,
    )
    .await;

    let config = create_test_config(vec![format!("{}/", base_url)], 5, vec![]);
    let result = run_crawl(config).await;

    assert_eq!(result.urls_visited, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_seed_and_link_back_share_one_claim() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>hello <a href="/">self</a></body></html>"#.to_string(),
        1,
    )
    .await;

    // No trailing slash on the seed; the link back is "/"
    let config = create_test_config(vec![mock_server.uri()], 3, vec![]);
    let result = run_crawl(config).await;

    assert_eq!(result.urls_visited, 1);
    assert_eq!(
        result.word_count_map(),
        [("hello".to_string(), 1), ("self".to_string(), 1)]
            .into_iter()
            .collect::<HashMap<_, _>>()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_relative_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/docs/", base_url)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/docs/",
        r#"<html><body><a href="intro">intro</a></body></html>"#.to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/docs/intro",
        "<html><body>chapter one</body></html>".to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/intro",
        "<html><body>wrong place</body></html>".to_string(),
        0,
    )
    .await;

    let config = create_test_config(vec![format!("{}/docs", base_url)], 2, vec![]);
    let result = run_crawl(config).await;

    assert_eq!(result.urls_visited, 2);
    let counts = result.word_count_map();
    assert_eq!(counts.get("chapter"), Some(&1));
    assert!(!counts.contains_key("wrong"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_depth_fetches_nothing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "<html><body>never read</body></html>".to_string(),
        0,
    )
    .await;

    let config = create_test_config(vec![format!("{}/", base_url)], 0, vec![]);
    let result = run_crawl(config).await;

    assert_eq!(result, CrawlResult::new(vec![], 0));
}

#[test]
fn test_config_file_to_result_file() {
    let pages = tempfile::tempdir().unwrap();
    let index = pages.path().join("index.html");
    let about = pages.path().join("about.html");
    std::fs::write(
        &index,
        r#"<html><body>local local page <a href="about.html">about</a></body></html>"#,
    )
    .unwrap();
    std::fs::write(&about, "<html><body>local about page</body></html>").unwrap();

    let result_path = pages.path().join("result.json");
    let index_url = url::Url::from_file_path(&index).unwrap();

    let config_content = format!(
        r#"
[crawler]
start-pages = ["{}"]
ignored-words = ["page"]
max-depth = 2
timeout-seconds = 30
parallelism = 2
popular-word-count = 2

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[output]
result-path = "{}"
"#,
        index_url,
        result_path.display()
    );

    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    config_file.write_all(config_content.as_bytes()).unwrap();
    config_file.flush().unwrap();

    let config = load_config(config_file.path()).unwrap();
    let result = crawl(&config).unwrap();

    assert_eq!(result.urls_visited, 2);
    assert_eq!(
        result.word_counts,
        vec![("local".to_string(), 3), ("about".to_string(), 2)]
    );

    let output = config.output.result_path.as_deref().map(std::path::Path::new);
    write_result_json(&result, output).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&result_path).unwrap()).unwrap();
    assert_eq!(written["urlsVisited"], 2);
    assert_eq!(written["wordCounts"]["local"], 3);
}
