//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Catalog stores (JSON/YAML files, in-memory)
//! - `answers` - Answer sources (scripted)
//! - `reporting` - Reporters (tracing events, in-memory capture)

pub mod answers;
pub mod reporting;
pub mod storage;

pub use answers::{AnswerScript, AnswerScriptError, ScriptedAnswerSource};
pub use reporting::{InMemoryReporter, TracingReporter, VerdictReport};
pub use storage::{FileCatalogStore, InMemoryCatalogStore};
