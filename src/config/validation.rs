use crate::config::types::CrawlConfig;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates a resolved crawl configuration
pub fn validate(config: &CrawlConfig) -> ConfigResult<()> {
    validate_source_name(&config.source_name)?;
    validate_start_url(&config.start_url)?;
    validate_allowed_domain(&config.allowed_domain)?;

    if config.base_url.is_empty() {
        return Err(ConfigError::Validation(
            "base_url cannot be empty".to_string(),
        ));
    }

    if config.cycle_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "cycle_limit must be >= 1, got {}",
            config.cycle_limit
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_source_name(source_name: &str) -> ConfigResult<()> {
    if source_name.is_empty() {
        return Err(ConfigError::Validation(
            "source_name cannot be empty".to_string(),
        ));
    }

    if source_name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "source_name must not contain whitespace, got '{}'",
            source_name
        )));
    }

    Ok(())
}

/// The seed is fetched as-is, so it must already be absolute
pub(crate) fn validate_start_url(start_url: &str) -> ConfigResult<()> {
    let url = Url::parse(start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start_url '{}': {}", start_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "start_url '{}' must use http or https",
            start_url
        )));
    }

    Ok(())
}

fn validate_allowed_domain(domain: &str) -> ConfigResult<()> {
    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domain cannot be empty".to_string(),
        ));
    }

    if domain.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(ConfigError::Validation(format!(
            "allowed_domain '{}' must be a bare domain",
            domain
        )));
    }

    Ok(())
}
