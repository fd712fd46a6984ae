//! In-Memory Catalog Store Adapter
//!
//! Keeps catalog documents in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::CatalogDocument;
use crate::ports::{CatalogStore, CatalogStoreError};

/// In-memory storage for catalog documents
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    documents: Arc<RwLock<HashMap<String, CatalogDocument>>>,
}

impl InMemoryCatalogStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one document
    pub fn with_document(key: impl Into<String>, document: CatalogDocument) -> Self {
        let mut documents = HashMap::new();
        documents.insert(key.into(), document);
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }

    /// Clear all stored documents (useful for tests)
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }

    /// Get the number of stored documents
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn load(&self, key: &str) -> Result<CatalogDocument, CatalogStoreError> {
        let documents = self.documents.read().await;
        documents
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogStoreError::NotFound(key.to_string()))
    }

    async fn save(&self, key: &str, document: &CatalogDocument) -> Result<(), CatalogStoreError> {
        let mut documents = self.documents.write().await;
        documents.insert(key.to_string(), document.clone());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CatalogStoreError> {
        let documents = self.documents.read().await;
        Ok(documents.contains_key(key))
    }
}
