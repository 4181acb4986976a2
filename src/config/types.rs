use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the default user agent
pub const USER_AGENT_ENV: &str = "DOCWEAVE_USER_AGENT";

const DEFAULT_USER_AGENT: &str = concat!(
    "docweave/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/docweave/docweave)"
);

/// Main configuration structure for Docweave
///
/// Every field has a default so a config file only needs to name what it
/// changes. Command-line flags are applied on top of the loaded values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Root page of the documentation site (must include a scheme)
    pub base_url: String,

    /// Path of the assembled markdown document
    pub output: PathBuf,

    /// Prepend a table of contents
    pub toc: bool,

    /// Seconds to wait after each page and the unit of retry backoff
    pub delay: f64,

    /// Total attempts per fetch (at least 1)
    pub retries: u32,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Optional JSON or TOML file with selector overrides
    pub selector_file: Option<PathBuf>,

    /// Restrict the document to these navigation titles
    pub toc_items: Vec<String>,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Hosts whose images require authentication
    pub gated_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            output: PathBuf::from("documentation.md"),
            toc: false,
            delay: 0.5,
            retries: 3,
            timeout: 10,
            selector_file: None,
            toc_items: Vec::new(),
            user_agent: default_user_agent(),
            gated_hosts: vec!["gitbook.io".to_string()],
        }
    }
}

impl Config {
    /// Creates a default configuration for the given root URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// The inter-page delay as a duration
    ///
    /// Only meaningful after validation; invalid values collapse to zero.
    pub fn delay_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::ZERO)
    }

    /// The request timeout as a duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Returns the user agent from the environment, or the built-in default
pub fn default_user_agent() -> String {
    std::env::var(USER_AGENT_ENV)
        .ok()
        .filter(|ua| !ua.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}
