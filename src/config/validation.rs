//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("registry.api_base must be an http(s) URL, got '{0}'")]
    InvalidApiBase(String),
    #[error("registry.application_id must be non-zero")]
    ZeroApplicationId,
    #[error("registry.token_env must name an environment variable")]
    EmptyTokenEnv,
    #[error("registry.request_timeout_secs must be at least 1")]
    ZeroTimeout,
    #[error("scope.guild_id must be non-zero")]
    ZeroGuildId,
    #[error("sync.concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let base = &config.registry.api_base;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        errors.push(ValidationError::InvalidApiBase(base.clone()));
    }
    if config.registry.application_id.get() == 0 {
        errors.push(ValidationError::ZeroApplicationId);
    }
    if config.registry.token_env.trim().is_empty() {
        errors.push(ValidationError::EmptyTokenEnv);
    }
    if config.registry.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.scope.guild_id.is_some_and(|g| g.get() == 0) {
        errors.push(ValidationError::ZeroGuildId);
    }

    if config.sync.concurrency == 0 {
        errors.push(ValidationError::ZeroConcurrency);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
