//! WalkDecisionTreeHandler - Interviews a subject along a prebuilt decision tree.
//!
//! The tree fixes the question order up front. Benefits listed at the leaf
//! the answers lead to are eligible; every other benefit is not. A leaf cut
//! by the depth limit leaves its benefits unknown.

use std::sync::Arc;
use tracing::info;

use crate::domain::catalog::{Answer, BenefitVerdict, Catalog, Verdict};
use crate::domain::foundation::InterviewId;
use crate::domain::interview::{AnswerSet, InterviewError};
use crate::domain::planning::DecisionTree;
use crate::ports::{AnswerSource, Reporter};

/// Command to walk a decision tree.
#[derive(Debug, Clone)]
pub struct WalkDecisionTreeCommand {
    pub tree: Arc<DecisionTree>,
    /// Catalog the tree was built from; supplies the questions and benefit names.
    pub catalog: Catalog,
}

/// Result of a completed walk.
#[derive(Debug, Clone)]
pub struct WalkDecisionTreeResult {
    pub interview_id: InterviewId,
    pub verdicts: Vec<BenefitVerdict>,
    pub answers: AnswerSet,
    /// Benefits settled as eligible at the reached leaf.
    pub eligible: Vec<String>,
    /// True when the walk stopped at a depth-limited leaf.
    pub pruned: bool,
    /// Depth of the reached leaf; the root is depth 1.
    pub depth: usize,
}

/// Handler for decision-tree interviews.
pub struct WalkDecisionTreeHandler {
    answers: Arc<dyn AnswerSource>,
    reporter: Arc<dyn Reporter>,
}

impl WalkDecisionTreeHandler {
    pub fn new(answers: Arc<dyn AnswerSource>, reporter: Arc<dyn Reporter>) -> Self {
        Self { answers, reporter }
    }

    pub async fn handle(&self, cmd: WalkDecisionTreeCommand) -> Result<WalkDecisionTreeResult, InterviewError> {
        let interview_id = InterviewId::new();
        let mut recorded = AnswerSet::new();
        let mut walk = cmd.tree.walk();

        // 1. Follow the answers down to a leaf
        while let Some(title) = walk.next_question() {
            let attribute = cmd
                .catalog
                .attribute(title)
                .ok_or_else(|| InterviewError::NoSuchAttribute(title.to_string()))?;
            let value = self
                .answers
                .ask(attribute)
                .map_err(|e| InterviewError::answer_source(title, e.to_string()))?;

            recorded.record(&Answer::new(title, value.clone()))?;
            walk.answer(&value);
        }

        // 2. Derive verdicts from the leaf
        let reached = walk.outcome().unwrap_or_default();
        let pruned = walk.is_pruned();
        let at_leaf = if pruned { Verdict::Unknown } else { Verdict::Eligible };
        let verdicts: Vec<BenefitVerdict> = cmd
            .catalog
            .benefits()
            .iter()
            .map(|benefit| BenefitVerdict {
                name: benefit.name().to_string(),
                verdict: if reached.iter().any(|name| name == benefit.name()) {
                    at_leaf
                } else {
                    Verdict::Ineligible
                },
            })
            .collect();
        let eligible: Vec<String> = if pruned { Vec::new() } else { reached.to_vec() };

        // 3. Publish
        self.reporter.report_verdicts(&interview_id, &verdicts).await;

        info!(
            interview = %interview_id,
            questions = recorded.len(),
            depth = walk.depth(),
            eligible = eligible.len(),
            pruned,
            "Decision tree walk complete"
        );

        Ok(WalkDecisionTreeResult {
            interview_id,
            verdicts,
            answers: recorded,
            eligible,
            pruned,
            depth: walk.depth(),
        })
    }
}
