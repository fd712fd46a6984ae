//! Catalog source configuration

use serde::Deserialize;
use std::path::Path;

use super::error::ValidationError;

/// Where the catalog document lives
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to a `.json`, `.yaml` or `.yml` catalog document
    pub path: String,
}

impl CatalogConfig {
    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CATALOG__PATH"));
        }
        let extension = Path::new(&self.path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if !matches!(extension, "json" | "yaml" | "yml") {
            return Err(ValidationError::UnsupportedCatalogFormat(self.path.clone()));
        }
        Ok(())
    }
}
