use crate::config::types::{Config, OutputConfig, RetryConfig, SourceConfig};
use crate::model::MAX_CHAPTERS;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_retry_config(&config.retry)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates upstream site configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.index_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid index-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "index-url '{}' must use http or https",
            config.index_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.max_chapters < 1 || config.max_chapters > MAX_CHAPTERS {
        return Err(ConfigError::Validation(format!(
            "max-chapters must be between 1 and {}, got {}",
            MAX_CHAPTERS, config.max_chapters
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates retry configuration
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
