//! Catalog Store Port - Interface for loading and exporting catalogs.
//!
//! Stores deal in [`CatalogDocument`]s, the persisted shape. Building the
//! live [`Catalog`] resolves every attribute reference and is the point
//! where structural errors surface.

use async_trait::async_trait;

use crate::domain::catalog::{Catalog, CatalogDocument, CatalogError};

/// Errors that can occur during catalog store operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogStoreError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to decode catalog: {0}")]
    Decode(String),

    #[error("Failed to encode catalog: {0}")]
    Encode(String),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Port for reading and writing catalog documents
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Load the document stored under `key`
    ///
    /// # Errors
    /// Returns `CatalogStoreError::NotFound` if nothing is stored under `key`
    async fn load(&self, key: &str) -> Result<CatalogDocument, CatalogStoreError>;

    /// Store a document under `key`, replacing any previous one
    async fn save(&self, key: &str, document: &CatalogDocument) -> Result<(), CatalogStoreError>;

    /// Check if a document exists under `key`
    async fn exists(&self, key: &str) -> Result<bool, CatalogStoreError>;

    /// Load the document under `key` and build the live catalog
    ///
    /// # Errors
    /// Returns `CatalogStoreError::Catalog` on structural errors
    async fn load_catalog(&self, key: &str) -> Result<Catalog, CatalogStoreError> {
        let document = self.load(key).await?;
        Ok(document.into_catalog()?)
    }
}
