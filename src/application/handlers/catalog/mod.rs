//! Catalog command handlers.

mod export_catalog;
mod load_catalog;

pub use export_catalog::{ExportCatalogCommand, ExportCatalogHandler, ExportCatalogResult};
pub use load_catalog::{LoadCatalogCommand, LoadCatalogError, LoadCatalogHandler, LoadCatalogResult};
