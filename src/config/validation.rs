use crate::config::types::{Config, HttpConfig, IndexNowConfig, PerplexityConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_indexnow_config(&config.indexnow)?;
    validate_perplexity_config(&config.perplexity)?;
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_indexnow_config(config: &IndexNowConfig) -> Result<(), ConfigError> {
    validate_endpoint("indexnow.endpoint", &config.endpoint)?;

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "indexnow.max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

fn validate_perplexity_config(config: &PerplexityConfig) -> Result<(), ConfigError> {
    validate_endpoint("perplexity.endpoint", &config.endpoint)
}

/// Endpoints must be absolute http(s) URLs
fn validate_endpoint(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(())
}
