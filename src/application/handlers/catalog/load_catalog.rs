//! LoadCatalogHandler - Loads a catalog document and builds the live catalog.

use std::sync::Arc;
use tracing::info;

use crate::domain::catalog::{Catalog, CatalogError};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CatalogStore, CatalogStoreError};

/// Command to load a catalog.
#[derive(Debug, Clone)]
pub struct LoadCatalogCommand {
    /// Store key, e.g. a file path for the file store.
    pub key: String,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadCatalogResult {
    /// The catalog in its initial evaluation state.
    pub catalog: Catalog,
}

/// Error type for catalog loading.
#[derive(Debug)]
pub enum LoadCatalogError {
    /// Nothing stored under the key.
    NotFound(String),
    /// The document is structurally invalid.
    Invalid(CatalogError),
    /// The store failed to read or decode the document.
    Storage(CatalogStoreError),
}

impl std::fmt::Display for LoadCatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadCatalogError::NotFound(key) => write!(f, "Catalog not found: {}", key),
            LoadCatalogError::Invalid(err) => write!(f, "Invalid catalog: {}", err),
            LoadCatalogError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoadCatalogError {}

impl From<CatalogStoreError> for LoadCatalogError {
    fn from(err: CatalogStoreError) -> Self {
        match err {
            CatalogStoreError::NotFound(key) => LoadCatalogError::NotFound(key),
            CatalogStoreError::Catalog(err) => LoadCatalogError::Invalid(err),
            other => LoadCatalogError::Storage(other),
        }
    }
}

impl From<CatalogError> for LoadCatalogError {
    fn from(err: CatalogError) -> Self {
        LoadCatalogError::Invalid(err)
    }
}

impl From<LoadCatalogError> for DomainError {
    fn from(err: LoadCatalogError) -> Self {
        match err {
            LoadCatalogError::NotFound(key) => {
                DomainError::new(ErrorCode::CatalogNotFound, format!("Catalog not found: {}", key))
                    .with_detail("key", key)
            }
            LoadCatalogError::Invalid(err) => err.into(),
            LoadCatalogError::Storage(err) => DomainError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

/// Handler for loading catalogs.
pub struct LoadCatalogHandler {
    store: Arc<dyn CatalogStore>,
}

impl LoadCatalogHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: LoadCatalogCommand) -> Result<LoadCatalogResult, LoadCatalogError> {
        // 1. Read the persisted document
        let document = self.store.load(&cmd.key).await?;

        // 2. Resolve references and build the catalog
        let catalog = document.into_catalog()?;

        info!(
            key = %cmd.key,
            attributes = catalog.attributes().len(),
            benefits = catalog.benefits().len(),
            "Catalog loaded"
        );

        Ok(LoadCatalogResult { catalog })
    }
}
