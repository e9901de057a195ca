//! Text normalization for extracted paragraph content
//!
//! Normalized text is meant for coarse downstream analysis, not display, so
//! the transformation is intentionally lossy.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_RUN: hardcoded regex is valid")
});

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("SPACE_RUN: hardcoded regex is valid"));

/// Normalizes raw paragraph text
///
/// Every run of whitespace becomes a single space, then every character
/// that is neither alphanumeric nor a space is dropped. Spaces that end up
/// adjacent once punctuation is gone are collapsed again, which keeps the
/// function idempotent.
///
/// # Examples
///
/// ```
/// use sitescrape::text::normalize_text;
///
/// assert_eq!(normalize_text("Hello   world. Second!"), "Hello world Second");
/// assert_eq!(normalize_text("a - b"), "a b");
/// ```
pub fn normalize_text(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw, " ");

    let stripped: String = collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();

    SPACE_RUN.replace_all(&stripped, " ").into_owned()
}

/// Joins a page's paragraphs with single spaces and normalizes the result
pub fn normalize_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let joined = paragraphs
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    normalize_text(&joined)
}
