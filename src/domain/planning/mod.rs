//! Planning module - Choosing which question to ask next.
//!
//! Two strategies share the catalog:
//!
//! - [`GreedyPlanner`] works online against the live requirement trees.
//! - [`DecisionTreeBuilder`] works offline: the [`Relation`] of accepting
//!   rows is enumerated once and turned into a question tree that can be
//!   walked without touching the catalog again.

mod decision_tree;
mod errors;
mod greedy;
mod relation;
mod split_points;

pub use decision_tree::{
    Branches, CategoricalBranch, DecisionNode, DecisionTree, DecisionTreeBuilder, NumericBranch,
    TreeStats, TreeWalk,
};
pub use errors::PlanningError;
pub use greedy::{AttributeCoverage, GreedyPlanner};
pub use relation::{Constraint, ConstraintRow, Interval, LabelledRow, Relation};
pub use split_points::{probe_points, signature};
