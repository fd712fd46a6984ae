//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `catalog` - Attribute registry, requirement trees, benefits and the persisted document
//! - `planning` - Question selection: greedy planner, enumerator and decision trees
//! - `interview` - Interview session aggregate and its answer set

pub mod catalog;
pub mod foundation;
pub mod interview;
pub mod planning;
