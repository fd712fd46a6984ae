//! Answer Set - Append-only record of the answers given in one interview.

use serde::{Deserialize, Serialize};

use super::InterviewError;
use crate::domain::catalog::{Answer, AnswerValue};
use crate::domain::foundation::Timestamp;

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub attribute: String,
    pub value: AnswerValue,
    pub recorded_at: Timestamp,
}

/// Answers in the order they were given, at most one per attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    entries: Vec<RecordedAnswer>,
}

impl AnswerSet {
    /// Creates an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer.
    ///
    /// # Errors
    ///
    /// - `AlreadyAnswered` if the attribute already has an entry
    pub fn record(&mut self, answer: &Answer) -> Result<&RecordedAnswer, InterviewError> {
        if self.contains(&answer.attribute) {
            return Err(InterviewError::AlreadyAnswered(answer.attribute.clone()));
        }
        self.entries.push(RecordedAnswer {
            attribute: answer.attribute.clone(),
            value: answer.value.clone(),
            recorded_at: Timestamp::now(),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn get(&self, attribute: &str) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .find(|e| e.attribute == attribute)
            .map(|e| &e.value)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.get(attribute).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordedAnswer> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
