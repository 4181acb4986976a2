//! URL handling module for Docweave
//!
//! This module provides URL normalization, host comparison, gated-host
//! detection and resolution of relative references found in page markup.

mod domain;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::{extract_domain, is_gated_host, same_host};
pub use normalize::{normalize_parsed, normalize_url};

/// Resolves an `href`/`src` attribute against the page it appears on
///
/// Returns `None` for empty references and references that cannot be joined
/// onto the base.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docweave::url::resolve_reference;
///
/// let base = Url::parse("https://example.com/docs/page").unwrap();
/// let img = resolve_reference(&base, "img/a.png").unwrap();
/// assert_eq!(img.as_str(), "https://example.com/docs/img/a.png");
/// ```
pub fn resolve_reference(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    base.join(reference).ok()
}
