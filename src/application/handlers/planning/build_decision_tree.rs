//! BuildDecisionTreeHandler - Compiles a catalog into a decision tree.

use std::sync::Arc;
use tracing::info;

use crate::domain::catalog::Catalog;
use crate::domain::planning::{DecisionTree, DecisionTreeBuilder, PlanningError, Relation};
use crate::ports::Reporter;

/// Command to build a decision tree.
#[derive(Debug, Clone)]
pub struct BuildDecisionTreeCommand {
    pub catalog: Catalog,
    /// Leaf depth limit; `None` splits until rows are exhausted.
    pub max_depth: Option<usize>,
    /// Refuse catalogs whose relation could exceed this many rows.
    pub max_relation_rows: usize,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildDecisionTreeResult {
    pub tree: Arc<DecisionTree>,
}

/// Handler for decision-tree builds.
pub struct BuildDecisionTreeHandler {
    reporter: Arc<dyn Reporter>,
}

impl BuildDecisionTreeHandler {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }

    pub async fn handle(&self, cmd: BuildDecisionTreeCommand) -> Result<BuildDecisionTreeResult, PlanningError> {
        // 1. Enumerate accepting constraint rows
        let relation = Relation::from_catalog_bounded(&cmd.catalog, cmd.max_relation_rows)?;

        // 2. Split on the registry's attributes
        let mut builder = DecisionTreeBuilder::new();
        if let Some(limit) = cmd.max_depth {
            builder = builder.with_max_depth(limit);
        }
        let tree = builder.build(&relation, cmd.catalog.attributes())?;

        // 3. Publish the shape
        self.reporter.report_tree_stats(tree.stats()).await;

        info!(
            benefits = cmd.catalog.benefits().len(),
            max_depth = ?cmd.max_depth,
            "Decision tree ready"
        );

        Ok(BuildDecisionTreeResult { tree: Arc::new(tree) })
    }
}
