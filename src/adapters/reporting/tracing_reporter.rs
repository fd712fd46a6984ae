//! Tracing Reporter Adapter
//!
//! Publishes results as structured `tracing` events, so they land in the
//! same log stream (plain or JSON) as the rest of the application.

use async_trait::async_trait;
use tracing::info;

use crate::domain::catalog::{BenefitVerdict, Verdict};
use crate::domain::foundation::InterviewId;
use crate::domain::planning::TreeStats;
use crate::ports::Reporter;

/// Reporter that emits one event per verdict and one per tree build
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Reporter for TracingReporter {
    async fn report_verdicts(&self, interview: &InterviewId, verdicts: &[BenefitVerdict]) {
        for entry in verdicts {
            info!(
                interview = %interview,
                benefit = %entry.name,
                verdict = %entry.verdict,
                "Benefit verdict"
            );
        }
        let eligible = verdicts
            .iter()
            .filter(|v| v.verdict == Verdict::Eligible)
            .count();
        info!(
            interview = %interview,
            benefits = verdicts.len(),
            eligible,
            "Interview verdicts reported"
        );
    }

    async fn report_tree_stats(&self, stats: &TreeStats) {
        info!(
            max_depth = stats.max_depth,
            average_leaf_depth = stats.average_leaf_depth,
            leaf_count = stats.leaf_count,
            relation_rows = stats.relation_rows,
            "Decision tree statistics"
        );
    }
}
