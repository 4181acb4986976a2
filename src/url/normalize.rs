use crate::UrlError;
use url::{Position, Url};

/// Normalizes a URL for deduplication and cache keys
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Remove the fragment (everything after #)
/// 3. Remove trailing slashes from the path (the root path becomes empty)
/// 4. Keep scheme, host, port and path as parsed
/// 5. Keep the query string unless it is empty
///
/// Normalizing an already-normalized URL returns it unchanged.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(String)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse the URL, or it has no host
///
/// # Examples
///
/// ```
/// use docweave::url::normalize_url;
///
/// let url = normalize_url("https://example.com/a/?q=1#frag").unwrap();
/// assert_eq!(url, "https://example.com/a?q=1");
/// ```
pub fn normalize_url(url_str: &str) -> Result<String, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(format!("{url_str}: {e}")))?;
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }
    Ok(normalize_parsed(&url))
}

/// Normalizes an already parsed URL
///
/// The string form cannot be stored back into a `Url` because the `url`
/// crate always renders an empty http path as `/`.
pub fn normalize_parsed(url: &Url) -> String {
    let mut normalized = url[..Position::AfterPath].trim_end_matches('/').to_string();

    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        normalized.push('?');
        normalized.push_str(query);
    }

    normalized
}
