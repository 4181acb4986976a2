use crate::common::{fetcher, mount_html};
use docweave::crawler::{build_http_client, Fetcher, RetryPolicy};
use docweave::FetchError;
use scraper::Selector;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_document_parses_body() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/page",
        "<html><body><h1>Hello</h1></body></html>".to_string(),
    )
    .await;

    let doc = fetcher(3)
        .fetch_document(&format!("{}/page", mock_server.uri()))
        .await
        .expect("Fetch failed");

    let h1 = Selector::parse("h1").unwrap();
    let heading: String = doc.select(&h1).next().unwrap().text().collect();
    assert_eq!(heading, "Hello");
}

#[tokio::test]
async fn test_fetch_retries_until_success() {
    let mock_server = MockServer::start().await;

    // First two attempts fail
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetcher(3)
        .fetch_document(&format!("{}/flaky", mock_server.uri()))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_fetch_exhausts_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let err = fetcher(3)
        .fetch_document(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(!err.is_transient());
    match err {
        FetchError::Exhausted {
            attempts, source, ..
        } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, FetchError::Status { status: 404, .. }));
        }
        other => panic!("Expected exhausted error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_once_does_not_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = fetcher(3)
        .fetch_once(&format!("{}/busy", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_network_error_is_classified() {
    // Nothing listens on port 9 locally
    let err = fetcher(1)
        .fetch_once("http://127.0.0.1:9/")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "custom-agent/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client("custom-agent/2.0", Duration::from_secs(5)).unwrap();
    let fetcher = Fetcher::new(client, RetryPolicy::new(1, Duration::ZERO));

    assert!(fetcher
        .fetch_document(&format!("{}/", mock_server.uri()))
        .await
        .is_ok());
}
