//! Sitescrape: a breadth-first single-site scraper
//!
//! This crate crawls one logical site from a seed page, a generation at a time,
//! collecting the paragraph text of every page it visits and persisting the
//! collected records to JSON, TSV, and/or SQLite.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Sitescrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTML parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Crawl interrupted")]
    Interrupted,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Could not derive an allowed domain from start URL '{0}'")]
    DomainDerivation(String),
}

/// Transport errors for a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Protocol error for {url}: {message}")]
    Protocol { url: String, message: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Returns true for connection and protocol failures, which trigger the
    /// backoff pause before the crawl moves on
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connect { .. } | Self::Protocol { .. })
    }
}

/// HTML parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Not an HTML document: {0}")]
    NotHtml(String),
}

/// Everything that can go wrong while processing one page
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Persistence errors raised by the record sinks
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Can't save! No data collected")]
    NoRecords,

    #[error("Output file already exists: {0}")]
    AlreadyExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for Sitescrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for sink operations
pub type SinkResult<T> = std::result::Result<T, SinkError>;

// Re-export commonly used types
pub use config::{CrawlConfig, OutputTargets, Settings};
pub use crawler::{scrape_until, Crawler, HttpFetcher};
pub use state::{CrawlRecord, Frontier, UrlState};
pub use text::normalize_text;
pub use url::{derive_allowed_domain, LinkCanonicalizer};
