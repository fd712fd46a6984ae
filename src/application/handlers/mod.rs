//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod catalog;
pub mod interview;
pub mod planning;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{
    ExportCatalogCommand, ExportCatalogHandler, ExportCatalogResult, LoadCatalogCommand,
    LoadCatalogError, LoadCatalogHandler, LoadCatalogResult,
};
pub use interview::{
    RunGreedyInterviewCommand, RunGreedyInterviewHandler, RunGreedyInterviewResult,
    WalkDecisionTreeCommand, WalkDecisionTreeHandler, WalkDecisionTreeResult,
};
pub use planning::{BuildDecisionTreeCommand, BuildDecisionTreeHandler, BuildDecisionTreeResult};
