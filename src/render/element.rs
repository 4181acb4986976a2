//! Element-kind dispatch from markup to markdown
//!
//! Every element is classified into an [`ElementKind`] and converted by the
//! matching function. Unknown elements fall back to their flattened text.

use crate::dom::{find_all_tags, find_tag, inline_text, is_stripped, raw_text, spaced_text};
use crate::url::{is_gated_host, resolve_reference};
use scraper::node::Node;
use scraper::ElementRef;
use url::Url;

/// The element kinds the converter distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Image,
    Block,
    Heading(usize),
    InlineCode,
    CodeBlock,
    UnorderedList,
    OrderedList,
    Link,
    LineBreak,
    Table,
    /// Script, style and embedded navigation; never rendered
    Stripped,
    Other,
}

impl ElementKind {
    pub fn of(element: &ElementRef<'_>) -> Self {
        match element.value().name() {
            "img" => Self::Image,
            "p" | "div" => Self::Block,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "code" => Self::InlineCode,
            "pre" => Self::CodeBlock,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "a" => Self::Link,
            "br" => Self::LineBreak,
            "table" => Self::Table,
            name if is_stripped(name) => Self::Stripped,
            _ => Self::Other,
        }
    }
}

/// Converts the children of one page's content container
pub struct PageRenderer<'p> {
    page: &'p Url,
    gated_hosts: &'p [String],
}

impl<'p> PageRenderer<'p> {
    /// Creates a renderer resolving references against `page`
    pub fn new(page: &'p Url, gated_hosts: &'p [String]) -> Self {
        Self { page, gated_hosts }
    }

    /// Renders a content container into normalized markdown
    ///
    /// Top-level parts are joined with newlines and every blank line is then
    /// dropped, so no run of blank lines survives.
    pub fn render_container(&self, container: ElementRef<'_>) -> String {
        let parts: Vec<String> = container
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(text.trim().to_string()),
                Node::Element(_) => ElementRef::wrap(child).map(|el| self.render_element(el)),
                _ => None,
            })
            .filter(|part| !part.is_empty())
            .collect();

        tidy_lines(&parts.join("\n"))
    }

    /// Renders a single element according to its kind
    pub fn render_element(&self, element: ElementRef<'_>) -> String {
        match ElementKind::of(&element) {
            ElementKind::Image => self.image(element),
            ElementKind::Block => self.block(element),
            ElementKind::Heading(level) => heading(element, level),
            ElementKind::InlineCode => format!("`{}`", raw_text(element).trim()),
            ElementKind::CodeBlock => code_block(element),
            ElementKind::UnorderedList => self.list(element, |_| "*".to_string()),
            ElementKind::OrderedList => self.list(element, |i| format!("{i}.")),
            ElementKind::Link => self.link(element),
            ElementKind::LineBreak => "\n".to_string(),
            ElementKind::Table => table(element),
            ElementKind::Stripped => String::new(),
            ElementKind::Other => spaced_text(element),
        }
    }

    /// Image reference, or an authentication notice for gated hosts
    fn image(&self, element: ElementRef<'_>) -> String {
        let src = element.value().attr("src").unwrap_or_default().trim();
        if src.is_empty() {
            return String::new();
        }

        let alt = element.value().attr("alt").unwrap_or_default();
        let resolved = resolve_reference(self.page, src);

        match resolved {
            Some(url) if is_gated_host(&url, self.gated_hosts) => format!(
                "\n\n> [!NOTE] Image: {alt}\n> Original URL: {url}\n> (Note: This image requires authentication)\n\n"
            ),
            Some(url) => format!("\n\n![{alt}]({url})\n\n"),
            None => format!("\n\n![{alt}]({src})\n\n"),
        }
    }

    /// Paragraphs and generic containers: children joined by single spaces
    fn block(&self, element: ElementRef<'_>) -> String {
        let mut parts = Vec::new();

        for child in element.children() {
            match child.value() {
                Node::Text(text) => parts.push(text.trim().to_string()),
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        parts.push(self.render_element(el));
                    }
                }
                _ => {}
            }
        }

        parts.retain(|part| !part.is_empty());
        parts.join(" ")
    }

    fn list(&self, element: ElementRef<'_>, marker: impl Fn(usize) -> String) -> String {
        let items: Vec<String> = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "li")
            .enumerate()
            .map(|(i, li)| format!("{} {}", marker(i + 1), self.render_element(li)))
            .collect();

        format!("\n{}\n", items.join("\n"))
    }

    fn link(&self, element: ElementRef<'_>) -> String {
        let text = inline_text(element);
        let href = element.value().attr("href").unwrap_or_default().trim();

        if text.is_empty() || href.is_empty() {
            return text;
        }

        match resolve_reference(self.page, href) {
            Some(url) => format!("[{text}]({url})"),
            None => format!("[{text}]({href})"),
        }
    }
}

fn heading(element: ElementRef<'_>, level: usize) -> String {
    format!("\n\n{} {}\n\n", "#".repeat(level), inline_text(element))
}

/// Fenced block, annotated with the nested code element's language if any
fn code_block(element: ElementRef<'_>) -> String {
    match find_tag(element, "code") {
        Some(code) => {
            let lang = code
                .value()
                .classes()
                .find_map(|class| class.strip_prefix("language-"))
                .unwrap_or_default();
            format!("\n```{}\n{}\n```\n", lang, raw_text(code).trim())
        }
        None => format!("\n```\n{}\n```\n", raw_text(element).trim()),
    }
}

/// Pipe table: header from `th` cells, then one row per non-empty `tr`
fn table(element: ElementRef<'_>) -> String {
    let mut rows = Vec::new();

    let headers: Vec<String> = find_all_tags(element, &["th"])
        .into_iter()
        .map(inline_text)
        .collect();
    if !headers.is_empty() {
        rows.push(pipe_row(&headers));
        rows.push(pipe_row(&vec!["---".to_string(); headers.len()]));
    }

    for tr in find_all_tags(element, &["tr"]) {
        let cells: Vec<String> = find_all_tags(tr, &["td", "th"])
            .into_iter()
            .map(inline_text)
            .collect();
        if !cells.is_empty() {
            rows.push(pipe_row(&cells));
        }
    }

    format!("\n{}\n", rows.join("\n"))
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Drops blank lines
fn tidy_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
