//! Page content rendering
//!
//! [`ContentRenderer`] fetches a page, locates its main content container,
//! converts it to markdown and caches the result by normalized URL. Failures
//! are logged and reported as `None` so one bad page never aborts a run.

mod element;

pub use element::{ElementKind, PageRenderer};

use crate::crawler::Fetcher;
use crate::dom::inline_text;
use crate::selectors::{Role, SelectorTable};
use crate::state::PageCache;
use crate::url::normalize_url;
use crate::{ContentError, UrlError};
use scraper::Html;
use url::Url;

/// Fetches, converts and caches page content
pub struct ContentRenderer {
    fetcher: Fetcher,
    selectors: SelectorTable,
    gated_hosts: Vec<String>,
    cache: PageCache,
}

impl ContentRenderer {
    pub fn new(fetcher: Fetcher, selectors: SelectorTable, gated_hosts: Vec<String>) -> Self {
        Self {
            fetcher,
            selectors,
            gated_hosts,
            cache: PageCache::new(),
        }
    }

    /// Renders a page, consulting the cache first
    ///
    /// Returns `None` if the page could not be fetched or has no content
    /// container. Failures are not cached.
    pub async fn render(&mut self, url: &str) -> Option<String> {
        let key = match normalize_url(url) {
            Ok(key) => key,
            Err(e) => {
                tracing::error!("Invalid page URL {}: {}", url, e);
                return None;
            }
        };

        if let Some(text) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", key);
            return Some(text.to_string());
        }

        match self.fetch_and_convert(&key).await {
            Ok(text) => Some(self.cache.insert(key, text).to_string()),
            Err(e) => {
                tracing::error!("Error fetching content from {}: {}", key, e);
                None
            }
        }
    }

    /// Number of successfully rendered pages held in the cache
    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    async fn fetch_and_convert(&self, url: &str) -> Result<String, ContentError> {
        let document = self.fetcher.fetch_document(url).await?;
        self.convert(&document, url)
    }

    /// Converts an already fetched page
    pub fn convert(&self, document: &Html, url: &str) -> Result<String, ContentError> {
        let page = Url::parse(url).map_err(|e| UrlError::Parse(format!("{url}: {e}")))?;

        let container =
            self.selectors
                .resolve_content(document)
                .ok_or_else(|| ContentError::MissingContainer {
                    url: url.to_string(),
                })?;

        if let Some(title) = self.selectors.resolve(Role::Title, document) {
            tracing::debug!("Rendering \"{}\" from {}", inline_text(title), url);
        }

        Ok(PageRenderer::new(&page, &self.gated_hosts).render_container(container))
    }
}
