//! Reporter Port - Where results are published.

use async_trait::async_trait;

use crate::domain::catalog::BenefitVerdict;
use crate::domain::foundation::InterviewId;
use crate::domain::planning::TreeStats;

/// Port for publishing interview verdicts and tree statistics
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Publish the verdicts reached by one interview
    async fn report_verdicts(&self, interview: &InterviewId, verdicts: &[BenefitVerdict]);

    /// Publish the shape of a freshly built decision tree
    async fn report_tree_stats(&self, stats: &TreeStats);
}
