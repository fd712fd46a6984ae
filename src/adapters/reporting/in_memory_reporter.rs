//! In-Memory Reporter Adapter
//!
//! Captures reports in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::BenefitVerdict;
use crate::domain::foundation::InterviewId;
use crate::domain::planning::TreeStats;
use crate::ports::Reporter;

/// One captured verdict report
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictReport {
    pub interview: InterviewId,
    pub verdicts: Vec<BenefitVerdict>,
}

/// Reporter that keeps everything it is given
#[derive(Debug, Clone, Default)]
pub struct InMemoryReporter {
    verdicts: Arc<RwLock<Vec<VerdictReport>>>,
    tree_stats: Arc<RwLock<Vec<TreeStats>>>,
}

impl InMemoryReporter {
    /// Create a new, empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Get every verdict report received so far
    pub async fn verdict_reports(&self) -> Vec<VerdictReport> {
        self.verdicts.read().await.clone()
    }

    /// Get every tree statistics report received so far
    pub async fn tree_stats(&self) -> Vec<TreeStats> {
        self.tree_stats.read().await.clone()
    }
}

#[async_trait]
impl Reporter for InMemoryReporter {
    async fn report_verdicts(&self, interview: &InterviewId, verdicts: &[BenefitVerdict]) {
        self.verdicts.write().await.push(VerdictReport {
            interview: *interview,
            verdicts: verdicts.to_vec(),
        });
    }

    async fn report_tree_stats(&self, stats: &TreeStats) {
        self.tree_stats.write().await.push(stats.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Verdict;

    #[tokio::test]
    async fn test_in_memory_reporter_captures_reports() {
        let reporter = InMemoryReporter::new();
        let interview = InterviewId::new();
        let verdicts = vec![BenefitVerdict {
            name: "A".to_string(),
            verdict: Verdict::Eligible,
        }];
        let stats = TreeStats {
            max_depth: 2,
            average_leaf_depth: 2.0,
            leaf_count: 2,
            relation_rows: 1,
        };

        reporter.report_verdicts(&interview, &verdicts).await;
        reporter.report_tree_stats(&stats).await;

        let reports = reporter.verdict_reports().await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].interview, interview);
        assert_eq!(reports[0].verdicts, verdicts);
        assert_eq!(reporter.tree_stats().await, [stats]);
    }
}
