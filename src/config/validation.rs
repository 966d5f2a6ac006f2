use crate::config::types::{
    AnalyzerConfig, CleanerConfig, Config, CrawlerConfig, OutputConfig, ProviderConfig,
};
use crate::ConfigError;
use url::Url;

/// Deepest crawl the configuration accepts; link counts grow geometrically.
const MAX_CRAWL_DEPTH: u32 = 6;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_provider_config(&config.provider)?;
    validate_output_config(&config.output)?;
    validate_cleaner_config(&config.cleaner)?;
    validate_analyzer_config(&config.analyzer)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.seed.trim().is_empty() {
        return Err(ConfigError::Validation("seed cannot be empty".to_string()));
    }

    if config.max_depth < 1 || config.max_depth > MAX_CRAWL_DEPTH {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 1 and {}, got {}",
            MAX_CRAWL_DEPTH, config.max_depth
        )));
    }

    if config.listing_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "listing_prefix cannot be empty".to_string(),
        ));
    }

    if config.extra_stop_titles.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "extra_stop_titles cannot contain empty titles".to_string(),
        ));
    }

    Ok(())
}

/// Validates provider configuration
fn validate_provider_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.api_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "api_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.request_timeout < 1 || config.request_timeout > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be between 1 and 300 seconds, got {}",
            config.request_timeout
        )));
    }

    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_cleaner_config(config: &CleanerConfig) -> Result<(), ConfigError> {
    if config.min_degree < 1 {
        return Err(ConfigError::Validation(format!(
            "min_degree must be >= 1, got {}",
            config.min_degree
        )));
    }

    Ok(())
}

fn validate_analyzer_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    if config.top_n < 1 {
        return Err(ConfigError::Validation(format!(
            "top_n must be >= 1, got {}",
            config.top_n
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
