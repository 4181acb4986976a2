use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;
    validate_timing(config)?;

    if config.output.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the root URL: it must carry an http(s) scheme and a host
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    if base_url.trim().is_empty() {
        return Err(ConfigError::InvalidUrl("base URL cannot be empty".to_string()));
    }

    let url = Url::parse(base_url.trim()).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid URL format: {base_url} ({e}). Must include scheme (e.g., https://)"
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' must use http or https, got {}",
            base_url,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{base_url}' has no host"
        )));
    }

    Ok(())
}

/// Largest accepted inter-page delay in seconds
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Validates retry count, delay and timeout
fn validate_timing(config: &Config) -> Result<(), ConfigError> {
    if config.retries < 1 {
        return Err(ConfigError::Validation(format!(
            "retries must be >= 1, got {}",
            config.retries
        )));
    }

    if !config.delay.is_finite() || config.delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number of seconds, got {}",
            config.delay
        )));
    }

    if config.delay > MAX_DELAY_SECS {
        return Err(ConfigError::Validation(format!(
            "delay must be at most {} seconds, got {}",
            MAX_DELAY_SECS, config.delay
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1 second, got {}",
            config.timeout
        )));
    }

    Ok(())
}
