use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of generations a crawl may run
pub const DEFAULT_CYCLE_LIMIT: u32 = 3;

/// Default pause after a transient transport failure (seconds)
pub const DEFAULT_BACKOFF_SECS: u64 = 10;

/// Unresolved settings, layered from a TOML file and the command line
///
/// Every field is optional here; [`Settings::resolve`](crate::config::Settings)
/// applies defaults, derives missing values, and validates the result.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Identifier stamped on every record
    pub source_name: Option<String>,

    /// Seed page for the crawl
    pub start_url: Option<String>,

    /// Domain substring that marks a link as in scope
    pub allowed_domain: Option<String>,

    /// Prefix for site-relative links
    pub base_url: Option<String>,

    /// Maximum number of generations
    pub cycle_limit: Option<u32>,

    /// Pause after a transient transport failure (seconds)
    pub backoff_secs: Option<u64>,

    /// Per-request timeout (seconds); transport default when absent
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,

    /// Structured (JSON) output path
    pub json_filename: Option<PathBuf>,

    /// Delimited (TSV) output path
    pub tsv_filename: Option<PathBuf>,

    /// Relational (SQLite) output path
    pub db_filename: Option<PathBuf>,
}

/// Immutable per-run crawl parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlConfig {
    /// Identifier stamped on every record
    pub source_name: String,

    /// Seed page for the crawl
    pub start_url: String,

    /// Domain substring that marks a link as in scope
    pub allowed_domain: String,

    /// Prefix for site-relative links
    pub base_url: String,

    /// Maximum number of generations
    pub cycle_limit: u32,

    /// Pause after a transient transport failure
    pub backoff: Duration,

    /// Per-request timeout; transport default when `None`
    pub request_timeout: Option<Duration>,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Where the collected records go at the end of the run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTargets {
    pub json: Option<PathBuf>,
    pub tsv: Option<PathBuf>,
    pub db: Option<PathBuf>,
}

impl OutputTargets {
    /// Returns true when no file sink is configured
    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.tsv.is_none() && self.db.is_none()
    }
}
