//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with the configured user agent and timeout
//! - Single GET attempts that classify failures
//! - Retried page fetches that return a parsed document

use crate::config::Config;
use crate::crawler::retry::RetryPolicy;
use crate::FetchError;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Value of the User-Agent header
/// * `timeout` - Total request timeout
///
/// # Example
///
/// ```no_run
/// use docweave::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("docweave/0.1", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests and parses successful responses into documents
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher from an existing client and retry policy
    pub fn new(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Creates a fetcher from the run configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, config.timeout_duration())?;
        Ok(Self::new(
            client,
            RetryPolicy::new(config.retries, config.delay_duration()),
        ))
    }

    /// The retry policy shared with navigation discovery
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetches a page with retry
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Non-2xx status (including 429) | Retry after `delay * attempt` |
    /// | Network error or timeout | Retry after `delay * attempt` |
    /// | Budget exhausted | `FetchError::Exhausted` |
    pub async fn fetch_document(&self, url: &str) -> Result<Html, FetchError> {
        self.retry
            .run(url, |_| self.fetch_once(url))
            .await
            .map_err(|last| FetchError::Exhausted {
                url: url.to_string(),
                attempts: self.retry.attempts(),
                source: Box::new(last),
            })
    }

    /// Performs exactly one GET request
    ///
    /// HTML parsing is error-recovering, so any 2xx body yields a document.
    pub async fn fetch_once(&self, url: &str) -> Result<Html, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
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

        let body = response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        Ok(Html::parse_document(&body))
    }
}
