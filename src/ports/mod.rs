//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CatalogStore` - Loading and exporting catalog documents
//! - `AnswerSource` - Supplying answers to interview questions
//! - `Reporter` - Publishing verdicts and decision-tree statistics

mod answer_source;
mod catalog_store;
mod reporter;

pub use answer_source::{AnswerSource, AnswerSourceError};
pub use catalog_store::{CatalogStore, CatalogStoreError};
pub use reporter::Reporter;
