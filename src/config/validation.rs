use crate::config::types::{Config, CrawlerConfig, OutputConfig, QuakeConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_quake_config(&config.quake)?;
    Ok(())
}

/// Validates source site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be http or https, got '{}'",
            base.scheme()
        )));
    }

    if !config.detail_path_prefix.starts_with('/') || config.detail_path_prefix.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "detail-path-prefix must be a non-trivial absolute path, got '{}'",
            config.detail_path_prefix
        )));
    }

    if config.first_page == 0 {
        return Err(ConfigError::Validation(
            "first-page must be >= 1".to_string(),
        ));
    }

    if config.last_page < config.first_page {
        return Err(ConfigError::Validation(format!(
            "last-page ({}) must be >= first-page ({})",
            config.last_page, config.first_page
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates earthquake feed configuration
fn validate_quake_config(config: &QuakeConfig) -> Result<(), ConfigError> {
    Url::parse(&config.feed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid feed-url: {}", e)))?;

    if config.sample_path.is_empty() {
        return Err(ConfigError::Validation(
            "sample-path cannot be empty".to_string(),
        ));
    }

    if config.live_limit < 1 || config.sample_limit < 1 {
        return Err(ConfigError::Validation(
            "live-limit and sample-limit must be >= 1".to_string(),
        ));
    }

    Ok(())
}
