//! Table of contents generation

use crate::crawler::NavNode;

/// Heading line that opens the table of contents
pub const TOC_HEADING: &str = "# Table of Contents\n";

/// Derives the anchor slug for a title
///
/// Lower-cases the title and replaces each space with a hyphen. Colliding
/// slugs are not disambiguated.
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Generates the bullet list of the table of contents
///
/// One bullet per node, indented two spaces per tree level.
pub fn generate_toc(nodes: &[NavNode]) -> String {
    let mut lines = Vec::new();
    push_entries(nodes, 0, &mut lines);
    lines.join("\n")
}

fn push_entries(nodes: &[NavNode], level: usize, lines: &mut Vec<String>) {
    for node in nodes {
        lines.push(format!(
            "{}- [{}](#{})",
            "  ".repeat(level),
            node.title(),
            slugify(node.title())
        ));
        push_entries(node.children(), level + 1, lines);
    }
}
