//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetch`] seam
//! - HTML parsing into raw links and paragraph text
//! - Generation-by-generation crawl coordination and interrupt handling

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{scrape_until, Crawler, GenerationReport};
pub use fetcher::{build_http_client, Fetch, HttpFetcher};
pub use parser::{HtmlParser, ParsedPage};
