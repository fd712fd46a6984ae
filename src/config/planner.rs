//! Question planning configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Planner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// How questions are ordered
    #[serde(default)]
    pub strategy: Strategy,

    /// Leaf depth limit for decision trees; unset means unlimited
    pub max_depth: Option<usize>,

    /// Largest relation the decision-tree builder may enumerate
    #[serde(default = "default_max_relation_rows")]
    pub max_relation_rows: usize,
}

/// Question ordering strategy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Ask the attribute relevant to the most undecided benefits
    #[default]
    Greedy,
    /// Compile the catalog into a decision tree, then walk it
    DecisionTree,
}

impl PlannerConfig {
    /// Validate planner configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_depth == Some(0) {
            return Err(ValidationError::InvalidMaxDepth);
        }
        if self.max_relation_rows == 0 {
            return Err(ValidationError::InvalidRelationLimit);
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_depth: None,
            max_relation_rows: default_max_relation_rows(),
        }
    }
}

fn default_max_relation_rows() -> usize {
    100_000
}
