//! HTML parser for extracting links and paragraph text
//!
//! This module handles parsing a fetched page to extract:
//! - The raw `href` of every `<a>` tag (unresolved, as written)
//! - The text of every `<p>` tag

use crate::ParseError;
use scraper::{Html, Selector};

/// How much of the body is sniffed for binary content
const SNIFF_LEN: usize = 1024;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Raw anchor targets in document order
    pub links: Vec<String>,

    /// Text of each paragraph in document order
    pub paragraphs: Vec<String>,
}

/// Parses page bodies with pre-compiled selectors
#[derive(Debug, Clone)]
pub struct HtmlParser {
    anchor: Selector,
    paragraph: Selector,
}

impl HtmlParser {
    /// Compiles the anchor and paragraph selectors
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            anchor: compile("a[href]")?,
            paragraph: compile("p")?,
        })
    }

    /// Parses a page body
    ///
    /// Links are returned exactly as written in the `href` attribute; turning
    /// them into fetchable URLs is the canonicalizer's job. Bodies that are
    /// not valid UTF-8 are decoded lossily.
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedPage)` - Links and paragraphs of the page
    /// * `Err(ParseError)` - The body is binary content, not a document
    ///
    /// # Example
    ///
    /// ```
    /// use sitescrape::crawler::HtmlParser;
    ///
    /// let parser = HtmlParser::new().unwrap();
    /// let page = parser
    ///     .parse(br#"<html><body><p>Hi</p><a href="/about">About</a></body></html>"#)
    ///     .unwrap();
    /// assert_eq!(page.links, vec!["/about".to_string()]);
    /// assert_eq!(page.paragraphs, vec!["Hi".to_string()]);
    /// ```
    pub fn parse(&self, body: &[u8]) -> Result<ParsedPage, ParseError> {
        if body.iter().take(SNIFF_LEN).any(|b| *b == 0) {
            return Err(ParseError::NotHtml(
                "body contains NUL bytes".to_string(),
            ));
        }

        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let links = document
            .select(&self.anchor)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect();

        let paragraphs = document
            .select(&self.paragraph)
            .map(|element| element.text().collect::<String>())
            .collect();

        Ok(ParsedPage { links, paragraphs })
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
