use docweave::crawler::{build_http_client, Fetcher, RetryPolicy};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sidebar with two top-level entries, the second with one nested child
pub const SIDEBAR: &str = r#"<html><head><title>Docs</title></head><body>
    <nav>
      <ul>
        <li><a href="/intro">Introduction</a></li>
        <li><a href="/basics">Basics</a>
          <ul>
            <li><a href="/basics/getting-started">Getting Started</a></li>
          </ul>
        </li>
      </ul>
    </nav>
    </body></html>"#;

/// A documentation page with a heading and a paragraph
pub fn page(heading: &str, text: &str) -> String {
    format!(
        r#"<html><head><title>{heading}</title></head><body>
        <main><h3>{heading}</h3><p>{text}</p></main>
        </body></html>"#
    )
}

/// Mounts a GET handler returning an HTML body
pub async fn mount_html(server: &MockServer, route: &str, body: String) {
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

/// Fetcher with no backoff delay
pub fn fetcher(attempts: u32) -> Fetcher {
    let client = build_http_client("docweave-test/1.0", Duration::from_secs(5))
        .expect("Failed to build client");
    Fetcher::new(client, RetryPolicy::new(attempts, Duration::ZERO))
}
