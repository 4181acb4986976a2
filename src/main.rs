//! Docweave main entry point
//!
//! This is the command-line interface for the Docweave documentation scraper.

use anyhow::Context;
use clap::Parser;
use docweave::config::{read_config, validate, Config};
use docweave::crawler::scrape;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Docweave: turn a sidebar-navigated documentation site into one markdown file
///
/// Docweave reads the navigation sidebar of the given root page, converts
/// every linked page's main content to markdown and writes the pages in
/// sidebar order into a single document.
#[derive(Parser, Debug)]
#[command(name = "docweave")]
#[command(version)]
#[command(about = "Scrape a documentation site into a single markdown file", long_about = None)]
struct Cli {
    /// Root URL of the documentation site
    #[arg(value_name = "URL")]
    url: String,

    /// Output file path [default: documentation.md]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Prepend a table of contents
    #[arg(long)]
    toc: bool,

    /// Seconds to wait between pages and base of retry backoff [default: 0.5]
    #[arg(long)]
    delay: Option<f64>,

    /// Attempts per request [default: 3]
    #[arg(long)]
    retries: Option<u32>,

    /// Request timeout in seconds [default: 10]
    #[arg(long)]
    timeout: Option<u64>,

    /// JSON or TOML file with custom CSS selectors
    #[arg(long, value_name = "PATH")]
    selector_file: Option<PathBuf>,

    /// Navigation titles to extract (can be given multiple times)
    #[arg(short = 't', long = "toc-items", value_name = "TITLE")]
    toc_items: Vec<String>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Builds the run configuration from the optional file and the flags
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => read_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => Config::default(),
        };

        config.base_url = self.url;
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.toc {
            config.toc = true;
        }
        if let Some(delay) = self.delay {
            config.delay = delay;
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if self.selector_file.is_some() {
            config.selector_file = self.selector_file;
        }
        if !self.toc_items.is_empty() {
            config.toc_items = self.toc_items;
        }

        validate(&config).context("Invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let verbose = if cli.debug { cli.verbose.max(1) } else { cli.verbose };
    setup_logging(verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Scraping failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.into_config()?;

    tracing::info!("Scraping documentation from {}", config.base_url);
    if !config.toc_items.is_empty() {
        tracing::info!("Restricting to {} navigation items", config.toc_items.len());
    }

    let summary = scrape(config).await?;

    println!(
        "Documentation saved to {} ({} pages, {} failed)",
        summary.output.display(),
        summary.pages_rendered,
        summary.pages_failed
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docweave=info,warn"),
            1 => EnvFilter::new("docweave=debug,info"),
            2 => EnvFilter::new("docweave=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
