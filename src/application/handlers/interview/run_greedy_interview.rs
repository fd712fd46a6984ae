//! RunGreedyInterviewHandler - Interviews a subject one greedy question at a time.
//!
//! Each round asks the attribute relevant to the most undecided benefits,
//! records the answer and re-evaluates, until every benefit has a verdict.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::catalog::{Answer, BenefitVerdict, Catalog};
use crate::domain::foundation::{InterviewId, Timestamp};
use crate::domain::interview::{AnswerSet, InterviewError, InterviewSession};
use crate::ports::{AnswerSource, Reporter};

/// Command to run a greedy interview.
#[derive(Debug, Clone)]
pub struct RunGreedyInterviewCommand {
    pub catalog: Catalog,
}

/// Result of a completed interview.
#[derive(Debug, Clone)]
pub struct RunGreedyInterviewResult {
    pub interview_id: InterviewId,
    pub verdicts: Vec<BenefitVerdict>,
    pub answers: AnswerSet,
    /// Attribute titles in the order they were asked.
    pub questions: Vec<String>,
}

/// Handler for greedy interviews.
pub struct RunGreedyInterviewHandler {
    answers: Arc<dyn AnswerSource>,
    reporter: Arc<dyn Reporter>,
}

impl RunGreedyInterviewHandler {
    pub fn new(answers: Arc<dyn AnswerSource>, reporter: Arc<dyn Reporter>) -> Self {
        Self { answers, reporter }
    }

    pub async fn handle(
        &self,
        cmd: RunGreedyInterviewCommand,
    ) -> Result<RunGreedyInterviewResult, InterviewError> {
        // 1. Start from a clean evaluation state
        let mut session = InterviewSession::new(cmd.catalog);
        let mut questions = Vec::new();

        // 2. Ask until nothing relevant is left
        while let Some(attribute) = session.next_attribute() {
            let value = self
                .answers
                .ask(&attribute)
                .map_err(|e| InterviewError::answer_source(attribute.title(), e.to_string()))?;
            questions.push(attribute.title().to_string());

            let settled = session.submit(Answer::new(attribute.title(), value))?;
            debug!(attribute = attribute.title(), settled = ?settled, "Question answered");
        }

        // 3. Publish the verdicts
        let verdicts = session.verdicts();
        self.reporter.report_verdicts(session.id(), &verdicts).await;

        info!(
            interview = %session.id(),
            questions = questions.len(),
            elapsed_ms = Timestamp::now().duration_since(session.started_at()).num_milliseconds(),
            "Greedy interview complete"
        );

        Ok(RunGreedyInterviewResult {
            interview_id: *session.id(),
            verdicts,
            answers: session.answers().clone(),
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AnswerScript, InMemoryReporter, ScriptedAnswerSource};
    use crate::application::handlers::fixtures::sample_catalog;
    use crate::domain::catalog::{Attribute, Verdict};
    use crate::domain::foundation::ErrorCode;
    use crate::ports::AnswerSourceError;

    fn verdict_of(result: &RunGreedyInterviewResult, name: &str) -> Verdict {
        result
            .verdicts
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.verdict)
            .unwrap()
    }

    fn handler(script: AnswerScript) -> (RunGreedyInterviewHandler, Arc<InMemoryReporter>) {
        let reporter = Arc::new(InMemoryReporter::new());
        let handler =
            RunGreedyInterviewHandler::new(Arc::new(ScriptedAnswerSource::new(script)), reporter.clone());
        (handler, reporter)
    }

    #[tokio::test]
    async fn asks_most_shared_attribute_first() {
        let (handler, reporter) = handler(AnswerScript::new().with("age", 30.0).with("employed", "yes"));

        let result = handler
            .handle(RunGreedyInterviewCommand {
                catalog: sample_catalog(),
            })
            .await
            .unwrap();

        assert_eq!(result.questions, ["age", "employed"]);
        assert_eq!(verdict_of(&result, "A"), Verdict::Eligible);
        assert_eq!(verdict_of(&result, "B"), Verdict::Ineligible);

        let reports = reporter.verdict_reports().await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].interview, result.interview_id);
        assert_eq!(reports[0].verdicts, result.verdicts);
    }

    #[tokio::test]
    async fn stops_once_every_benefit_is_settled() {
        let (handler, _) = handler(AnswerScript::new().with("age", 10.0).with("employed", "yes"));

        let result = handler
            .handle(RunGreedyInterviewCommand {
                catalog: sample_catalog(),
            })
            .await
            .unwrap();

        assert_eq!(result.questions, ["age"]);
        assert_eq!(result.answers.len(), 1);
        assert!(result.verdicts.iter().all(|v| v.verdict == Verdict::Ineligible));
    }

    #[tokio::test]
    async fn missing_answer_aborts_without_report() {
        let (handler, reporter) = handler(AnswerScript::new().with("age", 30.0));

        let err = handler
            .handle(RunGreedyInterviewCommand {
                catalog: sample_catalog(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AnswerUnavailable);
        assert!(matches!(err, InterviewError::AnswerSource { ref attribute, .. } if attribute == "employed"));
        assert!(reporter.verdict_reports().await.is_empty());
    }

    #[tokio::test]
    async fn uses_any_answer_source() {
        let reporter = Arc::new(InMemoryReporter::new());
        let handler = RunGreedyInterviewHandler::new(Arc::new(MockAnswerSource), reporter);

        let result = handler
            .handle(RunGreedyInterviewCommand {
                catalog: sample_catalog(),
            })
            .await
            .unwrap();

        assert_eq!(verdict_of(&result, "A"), Verdict::Ineligible);
        assert_eq!(verdict_of(&result, "B"), Verdict::Eligible);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    /// Answers the last option and the upper half of every domain.
    struct MockAnswerSource;

    impl AnswerSource for MockAnswerSource {
        fn ask_categorical(&self, attribute: &Attribute) -> Result<String, AnswerSourceError> {
            attribute
                .options()
                .and_then(|options| options.last().cloned())
                .ok_or_else(|| AnswerSourceError::Unanswered(attribute.title().to_string()))
        }

        fn ask_numeric(&self, attribute: &Attribute) -> Result<f64, AnswerSourceError> {
            let (min, max) = attribute.bounds().unwrap_or((0.0, 0.0));
            Ok(min + (max - min) * 0.55)
        }
    }
}
