use crate::common::{fetcher, mount_html, page, SIDEBAR};
use docweave::crawler::{extract_navigation, Scraper};
use docweave::selectors::SelectorTable;
use docweave::{Config, DocweaveError, NavigationError};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves the sample sidebar and its three pages
async fn mount_site(server: &MockServer) {
    mount_html(server, "/", SIDEBAR.to_string()).await;
    mount_html(server, "/intro", page("Intro page", "Welcome.")).await;
    mount_html(server, "/basics", page("Basics page", "The basics.")).await;
    mount_html(
        server,
        "/basics/getting-started",
        page("Started page", "First steps."),
    )
    .await;
}

fn test_config(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::new(base_url);
    config.output = dir.path().join("out").join("docs.md");
    config.delay = 0.0;
    config.retries = 2;
    config.timeout = 5;
    config
}

#[tokio::test]
async fn test_full_scrape_document() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&mock_server.uri(), &dir);

    let summary = Scraper::new(config)
        .expect("Failed to create scraper")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(summary.nav_nodes, 3);
    assert_eq!(summary.pages_visited, 3);
    assert_eq!(summary.pages_rendered, 3);
    assert_eq!(summary.pages_failed, 0);

    let doc = std::fs::read_to_string(&summary.output).expect("Output not written");

    let headings: Vec<&str> = doc.lines().filter(|l| l.starts_with('#')).collect();
    assert_eq!(
        headings,
        vec![
            "# Introduction",
            "### Intro page",
            "# Basics",
            "### Basics page",
            "## Getting Started",
            "### Started page",
        ]
    );
    assert_eq!(doc.matches("\n---\n").count(), 3);
    assert!(doc.contains("Welcome."));
    assert!(doc.contains("First steps."));
    assert!(!doc.contains("Table of Contents"));
}

#[tokio::test]
async fn test_scrape_with_toc() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&mock_server.uri(), &dir);
    config.toc = true;

    let (doc, _) = Scraper::new(config)
        .unwrap()
        .build_document()
        .await
        .unwrap();

    assert!(doc.starts_with("# Table of Contents\n"));
    assert!(doc.contains("- [Introduction](#introduction)"));
    assert!(doc.contains("\n  - [Getting Started](#getting-started)"));
    // TOC separator plus one per subtree
    assert_eq!(doc.matches("\n---\n").count(), 4);
}

#[tokio::test]
async fn test_toc_items_restrict_document() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&mock_server.uri(), &dir);
    config.toc_items = vec!["getting started".to_string()];

    let (doc, summary) = Scraper::new(config)
        .unwrap()
        .build_document()
        .await
        .unwrap();

    assert_eq!(summary.nav_nodes, 2);
    assert!(!doc.contains("# Introduction"));
    assert!(doc.contains("# Basics"));
    assert!(doc.contains("## Getting Started"));
}

#[tokio::test]
async fn test_repeated_url_inlined_once() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        r#"<nav><ul>
            <li><a href="/guide">Guide</a></li>
            <li><a href="/guide#again">Guide Again</a></li>
        </ul></nav>"#
            .to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/guide"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Guide page", "Once.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let (doc, summary) = Scraper::new(test_config(&mock_server.uri(), &dir))
        .unwrap()
        .build_document()
        .await
        .unwrap();

    assert_eq!(summary.pages_visited, 1);
    assert_eq!(doc.matches("Once.").count(), 1);
    assert!(doc.contains("# Guide Again"));
}

#[tokio::test]
async fn test_failed_page_keeps_heading() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", SIDEBAR.to_string()).await;
    mount_html(&mock_server, "/intro", page("Intro page", "Welcome.")).await;
    mount_html(
        &mock_server,
        "/basics/getting-started",
        page("Started page", "First steps."),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/basics"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let (doc, summary) = Scraper::new(test_config(&mock_server.uri(), &dir))
        .unwrap()
        .build_document()
        .await
        .unwrap();

    assert_eq!(summary.pages_rendered, 2);
    assert_eq!(summary.pages_failed, 1);
    assert!(doc.contains("# Basics\n"));
    assert!(!doc.contains("Basics page"));
    assert!(doc.contains("First steps."));
}

#[tokio::test]
async fn test_navigation_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&mock_server.uri(), &dir);
    let output = config.output.clone();

    let result = Scraper::new(config).unwrap().run().await;

    assert!(matches!(
        result,
        Err(DocweaveError::Navigation(NavigationError::Exhausted { attempts: 2, .. }))
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_empty_navigation_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<nav><ul><li>No link</li></ul></nav>"),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let root = Url::parse(&mock_server.uri()).unwrap();
    let err = extract_navigation(&fetcher(3), &SelectorTable::default(), &root)
        .await
        .unwrap_err();

    match err {
        NavigationError::Exhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, NavigationError::NoItems { .. }));
        }
        other => panic!("Expected exhausted error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_off_site_links_excluded() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        r#"<div class="sidebar"><ul>
            <li><a href="/local">Local</a></li>
            <li><a href="https://elsewhere.example.org/page">Elsewhere</a></li>
        </ul></div>"#
            .to_string(),
    )
    .await;

    let root = Url::parse(&mock_server.uri()).unwrap();
    let tree = extract_navigation(&fetcher(1), &SelectorTable::default(), &root)
        .await
        .unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].title(), "Local");
    assert_eq!(tree[0].url(), format!("{}/local", mock_server.uri()));
}
