//! Scrape coordinator - runs a complete documentation scrape
//!
//! A run has two phases:
//! - Discover the navigation tree from the root page (fatal on failure)
//! - Assemble the document page by page (per-page failures are logged)
//!
//! The assembled document is then written to the configured output path.

use crate::config::{validate, Config};
use crate::crawler::navigation::{count_nodes, extract_navigation, filter_by_titles, NavNode};
use crate::crawler::Fetcher;
use crate::output::{write_document, DocumentAssembler};
use crate::render::ContentRenderer;
use crate::selectors::SelectorTable;
use crate::url::normalize_url;
use crate::{Result, UrlError};
use std::path::PathBuf;
use url::Url;

/// Outcome of a completed scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Nodes in the navigation tree after title filtering
    pub nav_nodes: usize,
    /// Distinct pages whose content was requested
    pub pages_visited: usize,
    /// Pages rendered successfully
    pub pages_rendered: usize,
    /// Pages that could not be fetched or had no content
    pub pages_failed: usize,
    /// Where the document was written
    pub output: PathBuf,
}

/// Main scraper structure
pub struct Scraper {
    config: Config,
    fetcher: Fetcher,
    selectors: SelectorTable,
    root: Url,
}

impl Scraper {
    /// Creates a scraper from a configuration
    ///
    /// Validates the configuration, builds the HTTP client and loads the
    /// selector table (falling back to the defaults if the override file is
    /// unusable).
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let root = normalize_url(&config.base_url)?;
        let root = Url::parse(&root).map_err(|e| UrlError::Parse(e.to_string()))?;

        let fetcher = Fetcher::from_config(&config)?;
        let selectors = SelectorTable::load(config.selector_file.as_deref());

        Ok(Self {
            config,
            fetcher,
            selectors,
            root,
        })
    }

    /// Normalized root URL of the site
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Discovers the navigation tree, applying the configured title filter
    pub async fn navigation(&self) -> Result<Vec<NavNode>> {
        tracing::info!("Extracting navigation from {}", self.root);
        let tree = extract_navigation(&self.fetcher, &self.selectors, &self.root).await?;
        tracing::info!("Found {} navigation entries", count_nodes(&tree));

        Ok(filter_by_titles(&tree, &self.config.toc_items))
    }

    /// Discovers the tree and assembles the document without writing it
    pub async fn build_document(self) -> Result<(String, ScrapeSummary)> {
        let tree = self.navigation().await?;

        let renderer = ContentRenderer::new(
            self.fetcher,
            self.selectors,
            self.config.gated_hosts.clone(),
        );
        let mut assembler =
            DocumentAssembler::new(renderer, self.config.delay_duration(), self.config.toc);

        tracing::info!("Generating documentation");
        let document = assembler.assemble(&tree).await;
        let stats = assembler.stats();

        let summary = ScrapeSummary {
            nav_nodes: count_nodes(&tree),
            pages_visited: stats.pages_visited,
            pages_rendered: stats.pages_rendered,
            pages_failed: stats.pages_failed,
            output: self.config.output,
        };

        Ok((document, summary))
    }

    /// Runs the scrape and writes the document
    pub async fn run(self) -> Result<ScrapeSummary> {
        let (document, summary) = self.build_document().await?;

        write_document(&summary.output, &document)?;
        tracing::info!("Documentation saved to {}", summary.output.display());
        tracing::info!("Processed {} pages", summary.pages_visited);

        Ok(summary)
    }
}

/// Runs a complete scrape for a configuration
pub async fn scrape(config: Config) -> Result<ScrapeSummary> {
    Scraper::new(config)?.run().await
}
