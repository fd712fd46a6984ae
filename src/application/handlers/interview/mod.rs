//! Interview command handlers.

mod run_greedy_interview;
mod walk_decision_tree;

pub use run_greedy_interview::{
    RunGreedyInterviewCommand, RunGreedyInterviewHandler, RunGreedyInterviewResult,
};
pub use walk_decision_tree::{WalkDecisionTreeCommand, WalkDecisionTreeHandler, WalkDecisionTreeResult};
