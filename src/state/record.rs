use chrono::Local;
use serde::{Deserialize, Serialize};

/// Format of the crawl-local timestamp stamped on each record
pub const TIMESTAMP_FORMAT: &str = "%y/%m/%d %H:%M:%S";

/// Field names in output order
pub const RECORD_FIELDS: [&str; 4] = ["timestamp", "source", "url", "text"];

/// One visited page's contribution to the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRecord {
    /// Local wall-clock time the page was recorded
    pub timestamp: String,

    /// Crawl identifier, constant per run
    pub source: String,

    /// The URL as it was queued, before canonicalization
    pub url: String,

    /// Normalized paragraph text of the page
    pub text: String,
}

impl CrawlRecord {
    /// Creates a record stamped with the current local time
    pub fn new(source: impl Into<String>, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            source: source.into(),
            url: url.into(),
            text: text.into(),
        }
    }

    /// Field values in [`RECORD_FIELDS`] order
    pub fn fields(&self) -> [&str; 4] {
        [&self.timestamp, &self.source, &self.url, &self.text]
    }
}
