//! Interview session aggregate.
//!
//! An interview owns a working copy of the catalog and the answers given so
//! far. Every accepted answer is recorded, relevant or not, and then fed to
//! the catalog's requirement trees.
//!
//! # Invariants
//!
//! - Each attribute is answered at most once until `reset`
//! - Only registered attributes can be answered
//! - Once `is_complete` holds, every benefit has a verdict

use std::sync::Arc;
use tracing::{debug, info};

use super::{AnswerSet, InterviewError};
use crate::domain::catalog::{Answer, Attribute, BenefitVerdict, Catalog};
use crate::domain::foundation::{InterviewId, Timestamp};
use crate::domain::planning::GreedyPlanner;

#[derive(Debug, Clone)]
pub struct InterviewSession {
    id: InterviewId,
    catalog: Catalog,
    answers: AnswerSet,
    started_at: Timestamp,
}

impl InterviewSession {
    /// Starts an interview over a catalog in its initial state.
    pub fn new(mut catalog: Catalog) -> Self {
        catalog.reset();
        Self {
            id: InterviewId::new(),
            catalog,
            answers: AnswerSet::new(),
            started_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the interview ID.
    pub fn id(&self) -> &InterviewId {
        &self.id
    }

    /// Returns the catalog in its current evaluation state.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the answers recorded so far.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Returns when the interview started.
    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    /// Returns true once no benefit is left undecided.
    pub fn is_complete(&self) -> bool {
        self.catalog.is_settled()
    }

    pub fn verdicts(&self) -> Vec<BenefitVerdict> {
        self.catalog.verdicts()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The greedy choice for the next question.
    pub fn next_attribute(&self) -> Option<Arc<Attribute>> {
        GreedyPlanner::next_attribute(&self.catalog)
    }

    /// Records an answer and evaluates it against every relevant benefit.
    ///
    /// Returns the names of the benefits settled by this answer.
    ///
    /// # Errors
    ///
    /// - `NoSuchAttribute` if the attribute is not registered
    /// - `AlreadyAnswered` if the attribute was answered before
    pub fn submit(&mut self, answer: Answer) -> Result<Vec<String>, InterviewError> {
        if self.catalog.attribute(&answer.attribute).is_none() {
            return Err(InterviewError::NoSuchAttribute(answer.attribute));
        }
        self.answers.record(&answer)?;

        let settled = self.catalog.evaluate(&answer);
        debug!(
            interview = %self.id,
            attribute = %answer.attribute,
            value = %answer.value,
            settled = settled.len(),
            "Answer recorded"
        );
        Ok(settled)
    }

    /// Clears all answers and returns every benefit to its initial state.
    pub fn reset(&mut self) {
        self.catalog.reset();
        self.answers.clear();
        info!(interview = %self.id, "Interview reset");
    }

    /// Releases the catalog with its evaluation state.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AttributeRegistry, Benefit, Comparison, Requirement, Verdict};

    fn catalog() -> Catalog {
        let registry = AttributeRegistry::from_attributes(vec![
            Attribute::numerical("age", "", 0.0, 120.0).unwrap(),
            Attribute::categorical("employed", "", vec!["yes", "no"]).unwrap(),
            Attribute::categorical("resident", "", vec!["yes", "no"]).unwrap(),
        ])
        .unwrap();
        let requirement = Requirement::all(vec![
            Requirement::numeric(registry.get("age").unwrap(), Comparison::AtLeast(18.0)).unwrap(),
            Requirement::categorical(registry.get("employed").unwrap(), vec!["yes"]).unwrap(),
        ]);
        let a = Benefit::new("A", &requirement).unwrap();
        Catalog::new(registry, vec![a]).unwrap()
    }

    #[test]
    fn submit_settles_and_completes() {
        let mut session = InterviewSession::new(catalog());
        assert_eq!(session.next_attribute().unwrap().title(), "age");

        assert_eq!(session.submit(Answer::number("age", 16.0)).unwrap(), ["A"]);
        assert!(session.is_complete());
        assert!(session.next_attribute().is_none());
        assert_eq!(session.verdicts()[0].verdict, Verdict::Ineligible);
    }

    #[test]
    fn irrelevant_answers_are_recorded() {
        let mut session = InterviewSession::new(catalog());
        assert!(session.submit(Answer::label("resident", "yes")).unwrap().is_empty());
        assert!(session.answers().contains("resident"));
        assert!(!session.is_complete());

        let recorded = session.answers().iter().next().unwrap();
        assert!(!recorded.recorded_at.is_before(session.started_at()));
    }

    #[test]
    fn repeated_answer_is_rejected_without_state_change() {
        let mut session = InterviewSession::new(catalog());
        session.submit(Answer::number("age", 20.0)).unwrap();

        let result = session.submit(Answer::number("age", 10.0));
        assert_eq!(result, Err(InterviewError::AlreadyAnswered("age".to_string())));
        assert_eq!(session.verdicts()[0].verdict, Verdict::Unknown);
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let mut session = InterviewSession::new(catalog());
        let result = session.submit(Answer::number("income", 10.0));
        assert_eq!(result, Err(InterviewError::NoSuchAttribute("income".to_string())));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn reset_clears_answers_and_verdicts() {
        let mut session = InterviewSession::new(catalog());
        session.submit(Answer::number("age", 16.0)).unwrap();
        session.reset();

        assert!(session.answers().is_empty());
        assert!(!session.is_complete());
        session.submit(Answer::number("age", 30.0)).unwrap();
    }
}
