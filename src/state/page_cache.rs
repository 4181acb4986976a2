use std::collections::HashMap;

/// Rendered page text keyed by normalized URL
///
/// The first stored rendering of a URL wins. Failed renderings are never
/// stored, so a later attempt for the same URL fetches again.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: HashMap<String, String>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached text for a normalized URL
    pub fn get(&self, url: &str) -> Option<&str> {
        self.pages.get(url).map(String::as_str)
    }

    /// Stores a rendering unless one is already present
    ///
    /// Returns the text that is cached for the URL afterwards.
    pub fn insert(&mut self, url: impl Into<String>, text: String) -> &str {
        self.pages.entry(url.into()).or_insert(text)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
