//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format for context '{0}'")]
    InvalidDatabaseUrl(String),

    #[error("Invalid database context name '{0}'")]
    InvalidContextName(String),

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Failover batch size {0} is outside 1..=1000")]
    InvalidBatchSize(usize),

    #[error("Failover replay interval must be greater than zero")]
    InvalidReplayInterval,

    #[error("Invalid log level directive '{0}'")]
    InvalidLogLevel(String),
}
