//! Answer Source Port - Where interview answers come from.
//!
//! The planner decides which attribute to ask about; the source supplies
//! the value. Sources are synchronous: an interactive front end blocks on
//! the subject, a scripted one looks the value up.

use crate::domain::catalog::{AnswerValue, Attribute, AttributeKind};

/// Errors that can occur while asking for an answer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnswerSourceError {
    #[error("No answer available for '{0}'")]
    Unanswered(String),

    #[error("Answer for '{attribute}' is not {expected}")]
    WrongShape {
        attribute: String,
        expected: &'static str,
    },
}

/// Port for obtaining answers to attribute questions
pub trait AnswerSource: Send + Sync {
    /// Ask for one of the attribute's labels
    fn ask_categorical(&self, attribute: &Attribute) -> Result<String, AnswerSourceError>;

    /// Ask for a number, ideally within the attribute's domain
    fn ask_numeric(&self, attribute: &Attribute) -> Result<f64, AnswerSourceError>;

    /// Ask in the shape matching the attribute's kind
    fn ask(&self, attribute: &Attribute) -> Result<AnswerValue, AnswerSourceError> {
        match attribute.kind() {
            AttributeKind::Categorical => self.ask_categorical(attribute).map(AnswerValue::Label),
            AttributeKind::Numerical => self.ask_numeric(attribute).map(AnswerValue::Number),
        }
    }
}
