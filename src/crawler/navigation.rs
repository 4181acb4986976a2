//! Navigation tree discovery
//!
//! The sidebar of the root page is located through the navigation selectors
//! and walked one list level at a time: only the direct `li` children of a
//! list are visited, and a list nested inside an item is walked recursively
//! to produce that item's children.

use crate::crawler::fetcher::Fetcher;
use crate::dom::{child_tags, find_descendant, find_tag, inline_text};
use crate::selectors::{Role, SelectorTable};
use crate::url::{normalize_parsed, resolve_reference, same_host};
use crate::NavigationError;
use scraper::{ElementRef, Html};
use url::Url;

/// Substrings of a `div` class that mark a probable sidebar
const NAV_CLASS_HINTS: &[&str] = &["nav", "sidebar"];

/// One entry of the navigation tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    title: String,
    url: String,
    depth: usize,
    children: Vec<NavNode>,
}

impl NavNode {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        depth: usize,
        children: Vec<NavNode>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            depth,
            children,
        }
    }

    /// Link text shown in the sidebar
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Normalized absolute URL of the page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of list containers enclosing the item in the source markup
    ///
    /// This is a property of the markup and may differ from the node's
    /// position in the tree when the sidebar nests irregularly.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[NavNode] {
        &self.children
    }

    /// Number of nodes in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + count_nodes(&self.children)
    }
}

/// Total number of nodes in a forest
pub fn count_nodes(nodes: &[NavNode]) -> usize {
    nodes.iter().map(NavNode::count).sum()
}

/// Fetches the root page and extracts its navigation tree
///
/// The whole attempt (fetch, container lookup, walk) is retried under the
/// fetcher's retry policy; an empty walk counts as a failed attempt.
///
/// # Arguments
///
/// * `fetcher` - Fetcher whose retry policy bounds the attempts
/// * `selectors` - Selector table providing the navigation candidates
/// * `root` - Normalized root URL of the site
pub async fn extract_navigation(
    fetcher: &Fetcher,
    selectors: &SelectorTable,
    root: &Url,
) -> Result<Vec<NavNode>, NavigationError> {
    let policy = fetcher.retry_policy();

    policy
        .run("navigation", |_| async move {
            let document = fetcher.fetch_once(root.as_str()).await?;
            let items = parse_navigation(&document, root, selectors)?;
            tracing::debug!("Found {} top-level navigation items", items.len());
            Ok::<_, NavigationError>(items)
        })
        .await
        .map_err(|last| NavigationError::Exhausted {
            attempts: policy.attempts(),
            source: Box::new(last),
        })
}

/// Extracts the navigation tree from an already fetched root page
///
/// Links are resolved against `root`; links to another host are dropped
/// together with their nested items.
pub fn parse_navigation(
    document: &Html,
    root: &Url,
    selectors: &SelectorTable,
) -> Result<Vec<NavNode>, NavigationError> {
    let container = locate_container(document, selectors).ok_or_else(|| {
        NavigationError::MissingContainer {
            url: root.to_string(),
        }
    })?;

    let list = find_tag(container, "ul").unwrap_or(container);
    let items = walk_list(list, root);

    if items.is_empty() {
        tracing::warn!("No navigation items found");
        return Err(NavigationError::NoItems {
            url: root.to_string(),
        });
    }

    Ok(items)
}

/// Finds the sidebar: configured selectors first, then tag/class heuristics
fn locate_container<'a>(document: &'a Html, selectors: &SelectorTable) -> Option<ElementRef<'a>> {
    selectors
        .resolve(Role::Navigation, document)
        .or_else(|| {
            tracing::debug!("Navigation element not found, trying fallback selectors");
            let root = document.root_element();
            find_descendant(root, |el| el.value().name() == "nav")
                .or_else(|| find_descendant(root, is_nav_like_div))
        })
}

fn is_nav_like_div(el: &ElementRef<'_>) -> bool {
    el.value().name() == "div"
        && el.value().attr("class").is_some_and(|class| {
            let class = class.to_lowercase();
            NAV_CLASS_HINTS.iter().any(|hint| class.contains(hint))
        })
}

/// Builds nodes from the direct `li` children of one list
fn walk_list(list: ElementRef<'_>, root: &Url) -> Vec<NavNode> {
    let mut items = Vec::new();

    for li in child_tags(list, "li") {
        let Some(link) = find_descendant(li, |el| {
            el.value().name() == "a" && el.value().attr("href").is_some()
        }) else {
            continue;
        };

        let href = link.value().attr("href").unwrap_or_default();
        let Some(url) = resolve_reference(root, href) else {
            continue;
        };

        if !same_host(&url, root) {
            tracing::debug!("Skipping off-site navigation link: {}", url);
            continue;
        }

        let title = inline_text(link);
        if title.is_empty() {
            tracing::debug!("Skipping navigation link without text: {}", url);
            continue;
        }

        let children = find_tag(li, "ul")
            .map(|nested| walk_list(nested, root))
            .unwrap_or_default();

        let node = NavNode::new(title, normalize_parsed(&url), list_depth(li), children);
        tracing::debug!("Added nav item: {} -> {}", node.title(), node.url());
        items.push(node);
    }

    items
}

/// Number of `ul`/`ol` ancestors of an element
fn list_depth(element: ElementRef<'_>) -> usize {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "ul" | "ol"))
        .count()
}

/// Restricts a navigation tree to the requested titles
///
/// A node whose title matches (case-insensitive, trimmed) is kept with its
/// whole subtree. A node that does not match is kept only if one of its
/// descendants matches, and then only with the matching branches. An empty
/// `titles` list keeps the tree unchanged.
pub fn filter_by_titles(nodes: &[NavNode], titles: &[String]) -> Vec<NavNode> {
    let wanted: Vec<String> = titles
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    if wanted.is_empty() {
        return nodes.to_vec();
    }

    let filtered = filter_nodes(nodes, &wanted);

    for title in &wanted {
        if !contains_title(&filtered, title) {
            tracing::warn!("Requested TOC item not found in navigation: {}", title);
        }
    }

    filtered
}

fn filter_nodes(nodes: &[NavNode], wanted: &[String]) -> Vec<NavNode> {
    nodes
        .iter()
        .filter_map(|node| {
            if wanted.contains(&node.title.trim().to_lowercase()) {
                return Some(node.clone());
            }

            let children = filter_nodes(&node.children, wanted);
            (!children.is_empty()).then(|| NavNode {
                children,
                ..node.clone()
            })
        })
        .collect()
}

fn contains_title(nodes: &[NavNode], wanted: &str) -> bool {
    nodes.iter().any(|node| {
        node.title.trim().to_lowercase() == wanted || contains_title(&node.children, wanted)
    })
}
