//! Document assembly
//!
//! The navigation tree is first flattened into a plan of headings and
//! separators in document order. The assembler then executes the plan
//! sequentially, rendering each page the first time its URL comes up.

use crate::crawler::NavNode;
use crate::output::toc::{generate_toc, TOC_HEADING};
use crate::render::ContentRenderer;
use crate::state::VisitedSet;
use std::time::Duration;

/// Horizontal rule emitted after each node and its children
pub const SEPARATOR: &str = "\n---\n";

/// One step of the assembly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Heading for a node, followed by its content on first visit
    Heading { level: usize, node: &'a NavNode },
    /// Rule closing a node's subtree
    Separator,
}

/// Flattens a navigation tree into assembly steps
///
/// Heading levels follow the position in the tree (1 for top-level nodes),
/// not the node's markup depth.
pub fn plan_document(nodes: &[NavNode]) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    plan_level(nodes, 1, &mut steps);
    steps
}

fn plan_level<'a>(nodes: &'a [NavNode], level: usize, steps: &mut Vec<Step<'a>>) {
    for node in nodes {
        steps.push(Step::Heading { level, node });
        plan_level(node.children(), level + 1, steps);
        steps.push(Step::Separator);
    }
}

/// Counters collected while assembling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub pages_visited: usize,
    pub pages_rendered: usize,
    pub pages_failed: usize,
}

/// Walks the navigation tree and stitches rendered pages together
pub struct DocumentAssembler {
    renderer: ContentRenderer,
    visited: VisitedSet,
    delay: Duration,
    toc: bool,
    stats: AssemblyStats,
}

impl DocumentAssembler {
    pub fn new(renderer: ContentRenderer, delay: Duration, toc: bool) -> Self {
        Self {
            renderer,
            visited: VisitedSet::new(),
            delay,
            toc,
            stats: AssemblyStats::default(),
        }
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    /// Assembles the full document for a navigation tree
    ///
    /// Each page body is inlined only under the first node that links to it;
    /// later nodes with the same URL get the heading alone. The configured
    /// delay is observed after every first visit.
    pub async fn assemble(&mut self, nodes: &[NavNode]) -> String {
        let mut parts: Vec<String> = Vec::new();

        if self.toc {
            parts.push(TOC_HEADING.to_string());
            parts.push(generate_toc(nodes));
            parts.push(SEPARATOR.to_string());
        }

        for step in plan_document(nodes) {
            match step {
                Step::Heading { level, node } => {
                    parts.push(format!("{} {}\n", "#".repeat(level), node.title()));
                    if let Some(body) = self.visit(node).await {
                        parts.push(format!("{}\n", body));
                    }
                }
                Step::Separator => parts.push(SEPARATOR.to_string()),
            }
        }

        tracing::info!(
            "Assembled {} pages ({} rendered, {} failed)",
            self.stats.pages_visited,
            self.stats.pages_rendered,
            self.stats.pages_failed
        );

        parts.join("\n")
    }

    /// Renders a node's page on its first visit
    async fn visit(&mut self, node: &NavNode) -> Option<String> {
        if node.url().is_empty() || !self.visited.mark(node.url()) {
            return None;
        }
        self.stats.pages_visited = self.visited.len();

        let body = self.renderer.render(node.url()).await;
        match &body {
            Some(_) => self.stats.pages_rendered += 1,
            None => self.stats.pages_failed += 1,
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        body.filter(|text| !text.is_empty())
    }
}
