//! Configuration module for Sitescrape
//!
//! Settings are layered from an optional TOML file, positional command-line
//! arguments, and `key=value` overrides, then resolved into an immutable
//! [`CrawlConfig`] and the [`OutputTargets`] for the finished run.
//!
//! # Example
//!
//! ```
//! use sitescrape::config::Settings;
//!
//! let mut settings = Settings::default();
//! settings
//!     .apply_args(["vox", "https://www.vox.com/", "cycle_limit=2"])
//!     .unwrap();
//! let (config, _targets) = settings.resolve().unwrap();
//! assert_eq!(config.allowed_domain, "vox.com");
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlConfig, OutputTargets, Settings, DEFAULT_BACKOFF_SECS, DEFAULT_CYCLE_LIMIT};

// Re-export parser functions
pub use parser::load_settings;
pub use validation::validate;
