//! Selector resolution for the semantic parts of a page
//!
//! Each [`Role`] maps to an ordered list of CSS selectors; the first selector
//! that matches anything wins. An override file replaces the list of every
//! role it names and leaves the other roles on their defaults.

use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Default navigation selectors
const DEFAULT_NAV: &[&str] = &["nav", "div.sidebar", "div[class*=\"sidebar\"]"];

/// Default content selectors
const DEFAULT_CONTENT: &[&str] = &["main", "article", "div.page-inner"];

/// Default title selectors
const DEFAULT_TITLE: &[&str] = &["h1", "title", "div.page-title"];

/// Content heuristics tried before the configured content selectors
///
/// Order: nested semantic container, top-level semantic containers, then
/// class-name substring matches.
const CONTENT_HEURISTICS: &[&str] = &[
    "main article",
    "main",
    "article",
    "div[class*=\"page-inner\"]",
    "div[class*=\"content\"]",
];

/// Semantic purpose a selector list is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Navigation,
    Content,
    Title,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Navigation, Role::Content, Role::Title];

    /// Parses a role name from an override file
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "nav" | "navigation" => Some(Self::Navigation),
            "content" => Some(Self::Content),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    fn defaults(self) -> &'static [&'static str] {
        match self {
            Self::Navigation => DEFAULT_NAV,
            Self::Content => DEFAULT_CONTENT,
            Self::Title => DEFAULT_TITLE,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigation => write!(f, "nav"),
            Self::Content => write!(f, "content"),
            Self::Title => write!(f, "title"),
        }
    }
}

/// A compiled selector together with its source text
#[derive(Debug, Clone)]
pub struct Query {
    source: String,
    selector: Selector,
}

impl Query {
    /// Compiles a selector, logging and discarding it if it is invalid
    pub fn compile(source: &str) -> Option<Self> {
        match Selector::parse(source) {
            Ok(selector) => Some(Self {
                source: source.to_string(),
                selector,
            }),
            Err(e) => {
                tracing::warn!("Ignoring invalid selector {:?}: {}", source, e);
                None
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// First element in the document matching this query
    pub fn first<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.selector).next()
    }
}

/// Raw override file: role name to selector strings
type Overrides = HashMap<String, Vec<String>>;

/// Ordered candidate selectors per role
#[derive(Debug, Clone)]
pub struct SelectorTable {
    roles: HashMap<Role, Vec<Query>>,
    content_heuristics: Vec<Query>,
}

impl Default for SelectorTable {
    fn default() -> Self {
        let roles = Role::ALL
            .iter()
            .map(|&role| (role, compile_all(role.defaults().iter().copied())))
            .collect();

        Self {
            roles,
            content_heuristics: compile_all(CONTENT_HEURISTICS.iter().copied()),
        }
    }
}

impl SelectorTable {
    /// Builds the table from defaults plus optional overrides
    ///
    /// A named role's list replaces the default list; unknown role names are
    /// ignored.
    pub fn with_overrides(overrides: Overrides) -> Self {
        let mut table = Self::default();

        for (key, queries) in overrides {
            match Role::from_key(&key) {
                Some(role) => {
                    tracing::debug!("Overriding {} selectors with {:?}", role, queries);
                    table
                        .roles
                        .insert(role, compile_all(queries.iter().map(String::as_str)));
                }
                None => tracing::debug!("Ignoring unknown selector role: {}", key),
            }
        }

        table
    }

    /// Loads the table from an optional override file
    ///
    /// A missing, unreadable or malformed file never fails: the built-in
    /// defaults are used and a warning is logged.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match read_overrides(path) {
            Ok(overrides) => Self::with_overrides(overrides),
            Err(e) => {
                tracing::warn!(
                    "Failed to load custom selectors from {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// The candidate queries for a role, in priority order
    pub fn queries(&self, role: Role) -> &[Query] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the first match of the role's candidate list
    pub fn resolve<'a>(&self, role: Role, document: &'a Html) -> Option<ElementRef<'a>> {
        first_match(role, self.queries(role), document)
    }

    /// Resolves the main content container
    ///
    /// The built-in heuristics are tried first and the role's configured
    /// selectors last.
    pub fn resolve_content<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        first_match(Role::Content, &self.content_heuristics, document)
            .or_else(|| self.resolve(Role::Content, document))
    }
}

fn first_match<'a>(role: Role, queries: &[Query], document: &'a Html) -> Option<ElementRef<'a>> {
    queries.iter().find_map(|query| {
        let found = query.first(document);
        if found.is_some() {
            tracing::debug!("Found {} using selector: {}", role, query.source());
        }
        found
    })
}

fn compile_all<'s>(sources: impl Iterator<Item = &'s str>) -> Vec<Query> {
    sources.filter_map(Query::compile).collect()
}

/// Reads an override file: TOML for `.toml` files, JSON otherwise
fn read_overrides(path: &Path) -> Result<Overrides, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let entries: HashMap<String, OverrideEntry> = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    Ok(entries
        .into_iter()
        .filter_map(|(key, entry)| match entry {
            OverrideEntry::Queries(queries) => Some((key, queries)),
            OverrideEntry::Other(_) => {
                tracing::debug!("Ignoring selector entry {:?}: not a list of strings", key);
                None
            }
        })
        .collect())
}

/// One value of the override file; anything but a string list is skipped
#[derive(Deserialize)]
#[serde(untagged)]
enum OverrideEntry {
    Queries(Vec<String>),
    Other(IgnoredAny),
}
