//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SHARED_KERNEL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use shared_kernel::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Replaying {} events per batch", config.failover.batch_size);
//! ```

mod database;
mod error;
mod failover;
mod logging;

pub use database::{DatabaseConfig, DEFAULT_CONTEXT};
pub use error::{ConfigError, ValidationError};
pub use failover::{FailoverConfig, ReplayFailurePolicy, DEFAULT_FAILOVER_BATCH_SIZE};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL contexts). Absent when only
    /// in-memory adapters are used.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Failover publisher and replayer configuration
    #[serde(default)]
    pub failover: FailoverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SHARED_KERNEL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SHARED_KERNEL__DATABASE__URL=...` -> `database.url = ...`
    /// - `SHARED_KERNEL__FAILOVER__REPLAY_POLICY=fail` -> `failover.replay_policy = Fail`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SHARED_KERNEL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.failover.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
