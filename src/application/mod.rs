//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Catalog handlers
    ExportCatalogCommand, ExportCatalogHandler, ExportCatalogResult,
    LoadCatalogCommand, LoadCatalogError, LoadCatalogHandler, LoadCatalogResult,
    // Interview handlers
    RunGreedyInterviewCommand, RunGreedyInterviewHandler, RunGreedyInterviewResult,
    WalkDecisionTreeCommand, WalkDecisionTreeHandler, WalkDecisionTreeResult,
    // Planning handlers
    BuildDecisionTreeCommand, BuildDecisionTreeHandler, BuildDecisionTreeResult,
};
