//! Planning command handlers.

mod build_decision_tree;

pub use build_decision_tree::{BuildDecisionTreeCommand, BuildDecisionTreeHandler, BuildDecisionTreeResult};
