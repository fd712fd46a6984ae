//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::{ConfigError, ValidationError};

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.log_level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Logging` if a subscriber is already installed.
    pub fn init(&self) -> Result<(), ConfigError> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

        let result = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| ConfigError::Logging(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info,eligibility_planner=debug".to_string()
}
