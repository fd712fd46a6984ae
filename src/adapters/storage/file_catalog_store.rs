//! File-based Catalog Store Adapter
//!
//! Stores catalog documents as JSON or YAML files on disk. Keys are paths
//! relative to the base directory; an absolute key is used as is.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::DocumentFormat;
use crate::domain::catalog::CatalogDocument;
use crate::ports::{CatalogStore, CatalogStoreError};

/// File-based storage for catalog documents
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    base_path: PathBuf,
}

impl FileCatalogStore {
    /// Create a new file store rooted at a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileCatalogStore::new("./data");
    /// let catalog = store.load_catalog("benefits.json").await?;
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a key
    fn file_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    /// Get the format for a key from its extension
    fn format(&self, key: &str) -> Result<DocumentFormat, CatalogStoreError> {
        DocumentFormat::from_path(Path::new(key))
            .ok_or_else(|| CatalogStoreError::UnsupportedFormat(key.to_string()))
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    async fn load(&self, key: &str) -> Result<CatalogDocument, CatalogStoreError> {
        let format = self.format(key)?;
        let file_path = self.file_path(key);

        if !self.exists(key).await? {
            return Err(CatalogStoreError::NotFound(key.to_string()));
        }

        let text = fs::read_to_string(&file_path)
            .await
            .map_err(|e| CatalogStoreError::Io(e.to_string()))?;

        format
            .decode(&text)
            .map_err(|e| CatalogStoreError::Decode(e.to_string()))
    }

    async fn save(&self, key: &str, document: &CatalogDocument) -> Result<(), CatalogStoreError> {
        let format = self.format(key)?;
        let file_path = self.file_path(key);

        if let Some(dir) = file_path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| CatalogStoreError::Io(e.to_string()))?;
        }

        let text = format
            .encode(document)
            .map_err(|e| CatalogStoreError::Encode(e.to_string()))?;

        fs::write(&file_path, text)
            .await
            .map_err(|e| CatalogStoreError::Io(e.to_string()))?;

        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CatalogStoreError> {
        fs::try_exists(self.file_path(key))
            .await
            .map_err(|e| CatalogStoreError::Io(e.to_string()))
    }
}
