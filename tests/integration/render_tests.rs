use crate::common::{fetcher, mount_html, page};
use docweave::render::ContentRenderer;
use docweave::selectors::SelectorTable;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn renderer(attempts: u32) -> ContentRenderer {
    ContentRenderer::new(
        fetcher(attempts),
        SelectorTable::default(),
        vec!["gitbook.io".to_string()],
    )
}

#[tokio::test]
async fn test_render_page_content() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/intro", page("Intro", "Welcome to the docs.")).await;

    let text = renderer(3)
        .render(&format!("{}/intro", mock_server.uri()))
        .await
        .expect("Render failed");

    assert_eq!(text, "### Intro\nWelcome to the docs.");
}

#[tokio::test]
async fn test_render_twice_fetches_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cached"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Cached", "Body")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut renderer = renderer(3);
    let url = format!("{}/cached", mock_server.uri());

    let first = renderer.render(&url).await;
    // Fragment and trailing slash normalize to the same cache key
    let second = renderer.render(&format!("{}/#section", url)).await;

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(renderer.cached_pages(), 1);
}

#[tokio::test]
async fn test_rate_limited_page_yields_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut renderer = renderer(3);
    let text = renderer
        .render(&format!("{}/limited", mock_server.uri()))
        .await;

    assert!(text.is_none());
    assert_eq!(renderer.cached_pages(), 0);
}

#[tokio::test]
async fn test_failure_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/later"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/later", page("Later", "Now available")).await;

    let mut renderer = renderer(1);
    let url = format!("{}/later", mock_server.uri());

    assert!(renderer.render(&url).await.is_none());
    assert!(renderer.render(&url).await.is_some());
}

#[tokio::test]
async fn test_missing_content_container() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bare"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><div>No main</div></body></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let text = renderer(3)
        .render(&format!("{}/bare", mock_server.uri()))
        .await;
    assert!(text.is_none());
}

#[tokio::test]
async fn test_scripts_and_gated_images() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/assets",
        r#"<html><body><main>
            <p>Visible text</p>
            <script>var hidden = "do not show";</script>
            <style>.x { color: red }</style>
            <img src="https://files.gitbook.io/a.png" alt="Diagram">
            <img src="/img/local.png" alt="Local">
        </main></body></html>"#
            .to_string(),
    )
    .await;

    let text = renderer(1)
        .render(&format!("{}/assets", mock_server.uri()))
        .await
        .expect("Render failed");

    assert!(text.contains("Visible text"));
    assert!(!text.contains("do not show"));
    assert!(!text.contains("color: red"));
    assert!(text.contains("> [!NOTE] Image: Diagram"));
    assert!(text.contains("(Note: This image requires authentication)"));
    assert!(text.contains(&format!("![Local]({}/img/local.png)", mock_server.uri())));
}
