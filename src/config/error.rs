//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Logging initialisation failed: {0}")]
    Logging(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Unsupported catalog file extension: {0}")]
    UnsupportedCatalogFormat(String),

    #[error("Decision tree depth limit must be at least 1")]
    InvalidMaxDepth,

    #[error("Relation row limit must be at least 1")]
    InvalidRelationLimit,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
