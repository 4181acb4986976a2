//! Markup-tree helpers shared by navigation extraction and rendering
//!
//! Text gathered through these helpers never includes the contents of
//! `script`, `style` or `nav` elements, so a content container behaves as if
//! those elements had been removed from it.

use scraper::node::Node;
use scraper::ElementRef;

/// Elements removed from a content container before conversion
pub const STRIPPED_TAGS: &[&str] = &["script", "style", "nav"];

/// Returns true if the tag is dropped from rendered output
pub fn is_stripped(name: &str) -> bool {
    STRIPPED_TAGS.contains(&name)
}

/// Collects the text nodes below an element in document order
pub fn text_pieces<'a>(element: ElementRef<'a>) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    push_text(element, &mut pieces);
    pieces
}

fn push_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push(&**text),
            Node::Element(el) if !is_stripped(el.name()) => {
                if let Some(child) = ElementRef::wrap(child) {
                    push_text(child, out);
                }
            }
            _ => {}
        }
    }
}

/// Concatenated text of an element, untouched
pub fn raw_text(element: ElementRef<'_>) -> String {
    text_pieces(element).concat()
}

/// Concatenated text with whitespace runs collapsed and ends trimmed
pub fn inline_text(element: ElementRef<'_>) -> String {
    raw_text(element)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Each text node trimmed, empty ones dropped, the rest joined by a space
pub fn spaced_text(element: ElementRef<'_>) -> String {
    text_pieces(element)
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the first element below `element` (excluding itself) matching `pred`
pub fn find_descendant<'a, P>(element: ElementRef<'a>, pred: P) -> Option<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| pred(el))
}

/// Finds the first element below `element` with the given tag name
pub fn find_tag<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    find_descendant(element, |el| el.value().name() == name)
}

/// All elements below `element` whose tag is one of `names`, in document order
pub fn find_all_tags<'a>(element: ElementRef<'a>, names: &[&str]) -> Vec<ElementRef<'a>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| names.contains(&el.value().name()))
        .collect()
}

/// Direct element children of `element` with the given tag name
pub fn child_tags<'a>(element: ElementRef<'a>, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == name)
}
