//! Docweave: stitch a sidebar-navigated documentation site into one document
//!
//! This crate discovers a documentation site's navigation tree from its root
//! page, converts every page's main content into markdown, and assembles the
//! pages into a single document in sidebar order.

pub mod config;
pub mod crawler;
pub mod dom;
pub mod output;
pub mod render;
pub mod selectors;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Docweave operations
#[derive(Debug, Error)]
pub enum DocweaveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Navigation extraction failed: {0}")]
    Navigation(#[from] NavigationError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Failure of a single page fetch
///
/// `Status` and `Network` are transient and drive the retry loop. `Exhausted`
/// is the fatal form surfaced once the attempt budget is spent.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Giving up on {url} after {attempts} attempts: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Returns true if another attempt may succeed
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Exhausted { .. })
    }
}

/// Errors raised while discovering the navigation tree
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Could not find a navigation container on {url}")]
    MissingContainer { url: String },

    #[error("No navigation items found on {url}")]
    NoItems { url: String },

    #[error("Failed to extract navigation after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<NavigationError>,
    },
}

/// Errors raised while extracting a single page's content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("No content found for {url}")]
    MissingContainer { url: String },
}

/// Result type alias for Docweave operations
pub type Result<T> = std::result::Result<T, DocweaveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{NavNode, Scraper, ScrapeSummary};
pub use crate::url::normalize_url;
