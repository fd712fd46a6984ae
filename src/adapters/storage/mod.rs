//! Storage Adapters
//!
//! Implementations of the CatalogStore port for loading and exporting catalogs.
//!
//! ## Available Adapters
//!
//! - **FileCatalogStore** - Stores documents as JSON or YAML files on disk
//! - **InMemoryCatalogStore** - Stores documents in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileCatalogStore, InMemoryCatalogStore};
//!
//! // Production: file-based storage
//! let store = FileCatalogStore::new("./data");
//!
//! // Testing: in-memory storage
//! let store = InMemoryCatalogStore::new();
//! ```

mod file_catalog_store;
mod format;
mod in_memory_catalog_store;

pub use file_catalog_store::FileCatalogStore;
pub use format::{CodecError, DocumentFormat};
pub use in_memory_catalog_store::InMemoryCatalogStore;
