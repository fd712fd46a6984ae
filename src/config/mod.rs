//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ELIGIBILITY_PLANNER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use eligibility_planner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Catalog at {}", config.catalog.path);
//! ```

mod catalog;
mod error;
mod interview;
mod logging;
mod planner;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use interview::InterviewConfig;
pub use logging::LoggingConfig;
pub use planner::{PlannerConfig, Strategy};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Catalog document location
    pub catalog: CatalogConfig,

    /// Question planning strategy and limits
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Interview answer source
    #[serde(default)]
    pub interview: InterviewConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ELIGIBILITY_PLANNER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ELIGIBILITY_PLANNER__CATALOG__PATH=benefits.json` -> `catalog.path = benefits.json`
    /// - `ELIGIBILITY_PLANNER__PLANNER__STRATEGY=decision_tree` -> `planner.strategy = decision_tree`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ELIGIBILITY_PLANNER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
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
        self.catalog.validate()?;
        self.planner.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
