use crate::config::types::{
    CrawlConfig, OutputTargets, Settings, DEFAULT_BACKOFF_SECS, DEFAULT_CYCLE_LIMIT,
};
use crate::config::validation::{validate, validate_start_url};
use crate::url::derive_allowed_domain;
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Order of the positional command-line arguments
const POSITIONAL_KEYS: &[&str] = &[
    "source_name",
    "start_url",
    "allowed_domain",
    "base_url",
    "cycle_limit",
];

/// A `key=value` key; URLs with `=` in their query stay positional
fn is_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

/// Loads settings from a TOML file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitescrape::config::load_settings;
///
/// let settings = load_settings(Path::new("scrape.toml")).unwrap();
/// println!("Source: {:?}", settings.source_name);
/// ```
pub fn load_settings(path: &Path) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

impl Settings {
    /// Overlays command-line arguments onto these settings
    ///
    /// Bare arguments fill `source_name start_url allowed_domain base_url
    /// cycle_limit` in order; `key=value` arguments set any field by name.
    pub fn apply_args<I, S>(&mut self, args: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut position = 0;

        for arg in args {
            let arg = arg.as_ref();
            match arg.split_once('=') {
                Some((key, value)) if is_key(key) => self.set(key, value)?,
                _ => {
                    let key = POSITIONAL_KEYS.get(position).ok_or_else(|| {
                        ConfigError::InvalidArgument(format!(
                            "unexpected positional argument '{}'",
                            arg
                        ))
                    })?;
                    self.set(key, arg)?;
                    position += 1;
                }
            }
        }

        Ok(())
    }

    /// Sets a single field by its snake_case name
    pub fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        match key {
            "source_name" => self.source_name = Some(value.to_string()),
            "start_url" => self.start_url = Some(value.to_string()),
            "allowed_domain" => self.allowed_domain = Some(value.to_string()),
            "base_url" => self.base_url = Some(value.to_string()),
            "cycle_limit" => self.cycle_limit = Some(parse_number(key, value)?),
            "backoff_secs" => self.backoff_secs = Some(parse_number(key, value)?),
            "request_timeout_secs" => self.request_timeout_secs = Some(parse_number(key, value)?),
            "user_agent" => self.user_agent = Some(value.to_string()),
            "json_filename" => self.json_filename = Some(PathBuf::from(value)),
            "tsv_filename" => self.tsv_filename = Some(PathBuf::from(value)),
            "db_filename" => self.db_filename = Some(PathBuf::from(value)),
            _ => {
                return Err(ConfigError::InvalidArgument(format!(
                    "unknown setting '{}'",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Applies defaults and derivations, then validates
    pub fn resolve(self) -> ConfigResult<(CrawlConfig, OutputTargets)> {
        let source_name = self
            .source_name
            .ok_or_else(|| ConfigError::Validation("source_name is required".to_string()))?;
        let start_url = self
            .start_url
            .ok_or_else(|| ConfigError::Validation("start_url is required".to_string()))?;

        let mut config = CrawlConfig::new(
            source_name,
            start_url,
            non_empty(self.allowed_domain),
            non_empty(self.base_url),
        )?;
        config.cycle_limit = self.cycle_limit.unwrap_or(DEFAULT_CYCLE_LIMIT);
        config.backoff = Duration::from_secs(self.backoff_secs.unwrap_or(DEFAULT_BACKOFF_SECS));
        config.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }

        validate(&config)?;

        let targets = OutputTargets {
            json: self.json_filename,
            tsv: self.tsv_filename,
            db: self.db_filename,
        };

        Ok((config, targets))
    }
}

impl CrawlConfig {
    /// Builds a config with default limits, deriving whatever is missing
    ///
    /// `start_url` must be an absolute http(s) URL. A missing
    /// `allowed_domain` is extracted from it; a missing `base_url` becomes
    /// `http://www.<allowed_domain>`.
    pub fn new(
        source_name: impl Into<String>,
        start_url: impl Into<String>,
        allowed_domain: Option<String>,
        base_url: Option<String>,
    ) -> ConfigResult<Self> {
        let start_url = start_url.into();
        validate_start_url(&start_url)?;

        let allowed_domain = match allowed_domain {
            Some(domain) => domain,
            None => derive_allowed_domain(&start_url)
                .ok_or_else(|| ConfigError::DomainDerivation(start_url.clone()))?,
        };

        let base_url = base_url.unwrap_or_else(|| format!("http://www.{}", allowed_domain));

        Ok(Self {
            source_name: source_name.into(),
            start_url,
            allowed_domain,
            base_url,
            cycle_limit: DEFAULT_CYCLE_LIMIT,
            backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
            request_timeout: None,
            user_agent: default_user_agent(),
        })
    }

    /// Replaces the generation limit
    pub fn with_cycle_limit(mut self, cycle_limit: u32) -> Self {
        self.cycle_limit = cycle_limit;
        self
    }

    /// Replaces the transient-failure backoff
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

fn default_user_agent() -> String {
    format!("sitescrape/{}", env!("CARGO_PKG_VERSION"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.parse().map_err(|_| {
        ConfigError::InvalidArgument(format!("{} must be an integer, got '{}'", key, value))
    })
}
