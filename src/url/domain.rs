use regex::Regex;
use std::sync::LazyLock;

/// A dot, anything, another dot, then a three-character TLD-like token
static DOMAIN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\..*\.\w{3}").expect("DOMAIN_SHAPE: hardcoded regex is valid")
});

/// Derives an allowed domain from a seed URL
///
/// This is a best-effort heuristic, not a URL parser: it takes the first
/// substring shaped like `.<anything>.<tld>` and strips the leading dot.
/// Seeds without two dots (e.g. `https://example.com/`) do not match.
///
/// # Returns
///
/// * `Some(String)` - The derived domain
/// * `None` - The seed contains no domain-shaped substring
///
/// # Examples
///
/// ```
/// use sitescrape::url::derive_allowed_domain;
///
/// assert_eq!(
///     derive_allowed_domain("https://www.msnbc.com/"),
///     Some("msnbc.com".to_string())
/// );
/// assert_eq!(derive_allowed_domain("https://localhost/"), None);
/// ```
pub fn derive_allowed_domain(start_url: &str) -> Option<String> {
    let matched = DOMAIN_SHAPE.find(start_url)?.as_str();
    let domain = matched.strip_prefix('.').unwrap_or(matched);

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}
