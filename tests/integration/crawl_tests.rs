//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end through the HTTP page driver.

use std::path::Path;
use std::time::Duration;
use sumi_drift::config::{load_config, Config, ConfigOverrides, DriverKind};
use sumi_drift::crawler::crawl;
use sumi_drift::{ConfigError, CrawlPhase, DriftError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the HTTP driver
fn create_test_config(seed: &str, max_pages: usize, report: &Path) -> Config {
    let overrides = ConfigOverrides {
        url: seed.to_string(),
        max_pages: Some(max_pages),
        network_timeout: Some(2.0),
        report_path: Some(report.to_path_buf()),
        driver: Some(DriverKind::Http),
        seed: Some(1),
        ..Default::default()
    };
    load_config(overrides, None).expect("valid test configuration")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.html");

    mount_page(
        &server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <a href="/page1">Page 1</a>
            <a href="page2#section">Page 2</a>
            <a href="https://other.example.org/x">External</a>
            <a href="/brochure.pdf">Brochure</a>
            <a href="mailto:someone@example.com">Mail</a>
            </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/page1",
        r#"<html><body><a href="/page2">Page 2</a><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_page(&server, "/page2", "<html><body>No links here</body></html>").await;

    let config = create_test_config(&format!("{}/", base), 10, &report_path);
    let outcome = crawl(config).await.expect("crawl should succeed");
    let report = &outcome.report;

    assert_eq!(outcome.stopped_by, CrawlPhase::Exhausted);
    assert_eq!(outcome.pages_navigated, 3);
    assert_eq!(outcome.navigation_failures, 0);

    assert_eq!(
        report.sorted_discovered(),
        vec![
            format!("{}/", base),
            format!("{}/page1", base),
            format!("{}/page2", base),
        ]
    );
    assert_eq!(report.sorted_visited(), report.sorted_discovered());

    // The external link and the PDF were never requested
    assert_eq!(report.requests.len(), 3);
    assert!(report.requests.values().all(|&status| status == 200));
    assert_eq!(report.sorted_domains(), vec!["127.0.0.1"]);

    let html = std::fs::read_to_string(&report_path).expect("report written");
    assert!(html.contains(&format!("Crawl report for {}/", base)));
    assert!(html.contains(&format!("{}/page2", base)));
    assert!(!html.contains("other.example.org"));
}

#[tokio::test]
async fn test_page_budget_limits_navigations() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    let links: String = (1..=10)
        .map(|n| format!(r#"<a href="/p{}">{}</a>"#, n, n))
        .collect();
    Mock::given(method("GET"))
        .respond_with(html_page(&format!("<html><body>{}</body></html>", links)))
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/", base), 4, &dir.path().join("r.html"));
    let outcome = crawl(config).await.unwrap();

    assert_eq!(outcome.stopped_by, CrawlPhase::PageBudgetReached);
    assert_eq!(outcome.report.visited.len(), 4);
    assert_eq!(outcome.report.discovered.len(), 10);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 4);
}

#[tokio::test]
async fn test_redirects_are_observed() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/", r#"<a href="/old">Old</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/dir/new"))
        .mount(&server)
        .await;
    mount_page(&server, "/dir/new", r#"<a href="leaf">Leaf</a>"#).await;
    mount_page(&server, "/dir/leaf", "<p>done</p>").await;

    let config = create_test_config(&format!("{}/", base), 10, &dir.path().join("r.html"));
    let outcome = crawl(config).await.unwrap();
    let report = &outcome.report;

    assert_eq!(report.requests.get(&format!("{}/old", base)), Some(&301));
    assert_eq!(report.requests.get(&format!("{}/dir/new", base)), Some(&200));

    // Relative anchors resolve against the page the redirect landed on
    assert!(report
        .sorted_discovered()
        .contains(&format!("{}/dir/leaf", base).as_str()));
    assert!(report
        .sorted_visited()
        .contains(&format!("{}/old", base).as_str()));
}

#[tokio::test]
async fn test_error_statuses_are_counted() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/broken">Broken</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // Anything else falls through to wiremock's default 404

    let config = create_test_config(&format!("{}/", base), 10, &dir.path().join("r.html"));
    let outcome = crawl(config).await.unwrap();
    let report = &outcome.report;

    assert_eq!(outcome.navigation_failures, 0);
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.ok_count(), 1);
    assert_eq!(
        report.sorted_requests(),
        vec![
            (format!("{}/broken", base).as_str(), 500),
            (format!("{}/missing", base).as_str(), 404),
            (format!("{}/", base).as_str(), 200),
        ]
    );
}

#[tokio::test]
async fn test_non_html_response_yields_no_links() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/", r#"<a href="/api/status">Status</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"href": "/not-a-link"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/", base), 10, &dir.path().join("r.html"));
    let outcome = crawl(config).await.unwrap();

    assert_eq!(outcome.stopped_by, CrawlPhase::Exhausted);
    assert_eq!(outcome.report.visited.len(), 2);
    assert_eq!(outcome.report.discovered.len(), 1);
}

#[tokio::test]
async fn test_navigation_timeout_is_recovered() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("r.html");

    mount_page(&server, "/", r#"<a href="/slow">Slow</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("<a href=\"/never\">never</a>").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let overrides = ConfigOverrides {
        url: format!("{}/", base),
        network_timeout: Some(0.5),
        report_path: Some(report_path.clone()),
        driver: Some(DriverKind::Http),
        ..Default::default()
    };
    let config = load_config(overrides, None).unwrap();
    let outcome = crawl(config).await.unwrap();

    assert_eq!(outcome.stopped_by, CrawlPhase::Exhausted);
    assert_eq!(outcome.pages_navigated, 2);
    assert_eq!(outcome.navigation_failures, 1);
    assert!(!outcome
        .report
        .sorted_discovered()
        .iter()
        .any(|url| url.ends_with("/never")));
    assert!(report_path.exists());
}

#[tokio::test]
async fn test_explicit_domains_limit_scope() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/", r#"<a href="/a">A</a>"#).await;

    // The seed host is not in scope, so nothing it links to is followed
    let overrides = ConfigOverrides {
        url: format!("{}/", base),
        domains: vec!["*.example.com".to_string()],
        report_path: Some(dir.path().join("r.html")),
        driver: Some(DriverKind::Http),
        ..Default::default()
    };
    let outcome = crawl(load_config(overrides, None).unwrap()).await.unwrap();

    assert_eq!(outcome.pages_navigated, 1);
    assert!(outcome.report.discovered.is_empty());
    assert!(outcome.report.requests.is_empty());
    assert_eq!(outcome.report.sorted_domains(), vec!["127.0.0.1"]);
}

#[tokio::test]
async fn test_config_file_drives_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("from-file.html");

    mount_page(&server, "/", r#"<a href="/a">A</a>"#).await;

    let config_path = dir.path().join("drift.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[crawl]
max-pages = 1

[browser]
driver = "http"

[output]
report-path = "{}"
"#,
            report_path.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let overrides = ConfigOverrides {
        url: format!("{}/", base),
        ..Default::default()
    };
    let config = load_config(overrides, Some(&config_path)).unwrap();
    let outcome = crawl(config).await.unwrap();

    assert_eq!(outcome.stopped_by, CrawlPhase::PageBudgetReached);
    assert_eq!(outcome.report.visited.len(), 1);
    assert!(report_path.exists());
}

#[tokio::test]
async fn test_invalid_configuration_aborts_before_crawling() {
    let server = MockServer::start().await;

    let bad_pattern = ConfigOverrides {
        url: format!("{}/", server.uri()),
        domains: vec!["bad pattern".to_string()],
        driver: Some(DriverKind::Http),
        ..Default::default()
    };
    assert!(matches!(
        load_config(bad_pattern, None),
        Err(ConfigError::InvalidPattern(_))
    ));

    let bad_url = ConfigOverrides {
        url: "not a url".to_string(),
        ..Default::default()
    };
    let err = load_config(bad_url, None).unwrap_err();
    assert!(matches!(
        DriftError::from(err),
        DriftError::Config(ConfigError::InvalidUrl(_))
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}
