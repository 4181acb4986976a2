use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docweave::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs have the same host
///
/// URLs without a host (`mailto:`, `javascript:`) never match.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Returns true if the URL is served from one of the gated hosts
///
/// A host matches a gated entry when it equals the entry or is a subdomain
/// of it, so `files.gitbook.io` matches `gitbook.io`.
pub fn is_gated_host(url: &Url, gated_hosts: &[String]) -> bool {
    let Some(host) = extract_domain(url) else {
        return false;
    };

    gated_hosts.iter().any(|gated| {
        let gated = gated.trim().trim_start_matches('.').to_lowercase();
        !gated.is_empty()
            && (host == gated
                || host
                    .strip_suffix(gated.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.')))
    })
}
