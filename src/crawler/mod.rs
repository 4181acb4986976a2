//! Crawler module for page fetching and navigation discovery
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with retry and linear backoff
//! - Navigation tree extraction from the root page
//! - Overall scrape coordination

mod coordinator;
mod fetcher;
mod navigation;
mod retry;

pub use coordinator::{scrape, ScrapeSummary, Scraper};
pub use fetcher::{build_http_client, Fetcher};
pub use navigation::{
    count_nodes, extract_navigation, filter_by_titles, parse_navigation, NavNode,
};
pub use retry::RetryPolicy;
