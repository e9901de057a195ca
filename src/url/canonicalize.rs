use crate::config::CrawlConfig;
use regex::Regex;

/// Raw link targets that never lead anywhere worth tracking
const NON_NAVIGABLE: &[&str] = &["", "/", "//"];

/// Turns raw `href` values into absolute, in-scope URLs
///
/// The canonicalizer is deliberately permissive: it prefers pulling in some
/// noise over missing same-site links written as protocol-relative,
/// absolute, or site-relative references.
///
/// # Rules (first match wins)
///
/// 1. `""`, `"/"` and `"//"` are rejected
/// 2. A link containing the allowed domain is accepted; it is prefixed with
///    `https:` unless it already starts with `http`
/// 3. A link starting with `/` is appended to the base URL
/// 4. A link with a dot-delimited segment containing the source name is
///    accepted with the same prefixing as rule 2
/// 5. Anything else is rejected
#[derive(Debug, Clone)]
pub struct LinkCanonicalizer {
    allowed_domain: String,
    base_url: String,
    source_segment: Regex,
}

impl LinkCanonicalizer {
    /// Builds a canonicalizer for one crawl
    ///
    /// # Returns
    ///
    /// * `Ok(LinkCanonicalizer)` - Ready to use
    /// * `Err(regex::Error)` - The source-name pattern could not be compiled
    pub fn new(config: &CrawlConfig) -> Result<Self, regex::Error> {
        let source_segment = Regex::new(&format!(
            r"\.\w*{}\w*\.",
            regex::escape(&config.source_name)
        ))?;

        Ok(Self {
            allowed_domain: config.allowed_domain.clone(),
            base_url: config.base_url.clone(),
            source_segment,
        })
    }

    /// Canonicalizes a raw link
    ///
    /// # Returns
    ///
    /// * `Some(String)` - The absolute URL to fetch
    /// * `None` - The link is out of scope or not navigable
    ///
    /// # Example
    ///
    /// ```
    /// use sitescrape::config::CrawlConfig;
    /// use sitescrape::url::LinkCanonicalizer;
    ///
    /// let config = CrawlConfig::new(
    ///     "example",
    ///     "https://example.com/",
    ///     Some("example.com".to_string()),
    ///     Some("https://example.com".to_string()),
    /// )
    /// .unwrap();
    /// let canonicalizer = LinkCanonicalizer::new(&config).unwrap();
    ///
    /// assert_eq!(
    ///     canonicalizer.canonicalize("/about").as_deref(),
    ///     Some("https://example.com/about")
    /// );
    /// assert_eq!(canonicalizer.canonicalize("//"), None);
    /// ```
    pub fn canonicalize(&self, raw: &str) -> Option<String> {
        if NON_NAVIGABLE.contains(&raw) {
            return None;
        }

        if raw.contains(&self.allowed_domain) {
            return Some(with_scheme(raw));
        }

        if raw.starts_with('/') {
            return Some(format!("{}{}", self.base_url, raw));
        }

        if self.source_segment.is_match(raw) {
            return Some(with_scheme(raw));
        }

        None
    }
}

/// Keeps links that already carry a scheme, prefixes `https:` otherwise
fn with_scheme(link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("https:{}", link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicalizer() -> LinkCanonicalizer {
        let config = CrawlConfig::new(
            "example",
            "https://example.com/",
            Some("example.com".to_string()),
            Some("https://example.com".to_string()),
        )
        .unwrap();
        LinkCanonicalizer::new(&config).unwrap()
    }

    #[test]
    fn test_rejects_non_navigable() {
        let c = canonicalizer();
        assert_eq!(c.canonicalize(""), None);
        assert_eq!(c.canonicalize("/"), None);
        assert_eq!(c.canonicalize("//"), None);
    }

    #[test]
    fn test_absolute_in_domain_kept() {
        let c = canonicalizer();
        assert_eq!(
            c.canonicalize("https://example.com/news").as_deref(),
            Some("https://example.com/news")
        );
        assert_eq!(
            c.canonicalize("http://www.example.com/news").as_deref(),
            Some("http://www.example.com/news")
        );
    }

    #[test]
    fn test_protocol_relative_gets_https() {
        let c = canonicalizer();
        assert_eq!(
            c.canonicalize("//cdn.example.com/x").as_deref(),
            Some("https://cdn.example.com/x")
        );
    }

    #[test]
    fn test_site_relative_uses_base_url() {
        let c = canonicalizer();
        assert_eq!(
            c.canonicalize("/about").as_deref(),
            Some("https://example.com/about")
        );
        assert_eq!(
            c.canonicalize("/a/b?page=2").as_deref(),
            Some("https://example.com/a/b?page=2")
        );
    }

    #[test]
    fn test_domain_match_wins_over_relative() {
        let c = canonicalizer();
        // Contains the domain, so rule 2 applies before rule 3
        assert_eq!(
            c.canonicalize("/redirect/example.com").as_deref(),
            Some("https:/redirect/example.com")
        );
    }

    #[test]
    fn test_source_segment_match() {
        let c = canonicalizer();
        let story = "https://www.myexamplenews.org/story";
        assert_eq!(c.canonicalize(story).as_deref(), Some(story));
        assert_eq!(c.canonicalize("https://video.example-cdn.net/clip"), None);
        assert_eq!(
            c.canonicalize("video.examples.net/clip").as_deref(),
            Some("https:video.examples.net/clip")
        );
    }

    #[test]
    fn test_protocol_relative_off_domain_treated_as_path() {
        let c = canonicalizer();
        assert_eq!(
            c.canonicalize("//other.org/x").as_deref(),
            Some("https://example.com//other.org/x")
        );
    }

    #[test]
    fn test_rejects_off_domain() {
        let c = canonicalizer();
        assert_eq!(c.canonicalize("https://other.org/page"), None);
        assert_eq!(c.canonicalize("about.html"), None);
        assert_eq!(c.canonicalize("#top"), None);
        assert_eq!(c.canonicalize("mailto:someone@other.org"), None);
    }

    #[test]
    fn test_deterministic() {
        let c = canonicalizer();
        for raw in ["", "/", "//", "/about", "//cdn.example.com/x", "nope"] {
            assert_eq!(c.canonicalize(raw), c.canonicalize(raw));
        }
    }

    #[test]
    fn test_source_name_is_escaped() {
        let config = CrawlConfig::new(
            "a+b",
            "https://www.site.com/",
            Some("site.com".to_string()),
            None,
        )
        .unwrap();
        let c = LinkCanonicalizer::new(&config).unwrap();

        assert_eq!(
            c.canonicalize("https://www.xa+by.org/").as_deref(),
            Some("https://www.xa+by.org/")
        );
        assert_eq!(c.canonicalize("https://www.aab.org/"), None);
    }
}
