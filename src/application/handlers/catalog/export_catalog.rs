//! ExportCatalogHandler - Persists the current structure of a catalog.

use std::sync::Arc;
use tracing::info;

use crate::domain::catalog::{Catalog, CatalogDocument};
use crate::ports::{CatalogStore, CatalogStoreError};

/// Command to export a catalog.
#[derive(Debug, Clone)]
pub struct ExportCatalogCommand {
    /// Store key to write to.
    pub key: String,
    /// Catalog to export; evaluation state is not persisted.
    pub catalog: Catalog,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportCatalogResult {
    /// The document that was written.
    pub document: CatalogDocument,
}

/// Handler for exporting catalogs.
pub struct ExportCatalogHandler {
    store: Arc<dyn CatalogStore>,
}

impl ExportCatalogHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ExportCatalogCommand) -> Result<ExportCatalogResult, CatalogStoreError> {
        // 1. Capture the structure
        let document = CatalogDocument::from_catalog(&cmd.catalog);

        // 2. Write it
        self.store.save(&cmd.key, &document).await?;

        info!(
            key = %cmd.key,
            attributes = document.attributes.len(),
            benefits = document.benefits.len(),
            "Catalog exported"
        );

        Ok(ExportCatalogResult { document })
    }
}
