//! Interview-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while collecting answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterviewError {
    /// The attribute already has an answer in this interview.
    #[error("Attribute '{0}' has already been answered")]
    AlreadyAnswered(String),

    /// The attribute is not in the catalog's registry.
    #[error("No attribute named '{0}' in the catalog")]
    NoSuchAttribute(String),

    /// The answer source could not produce a value.
    #[error("No answer for '{attribute}': {reason}")]
    AnswerSource { attribute: String, reason: String },
}

impl InterviewError {
    pub fn answer_source(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        InterviewError::AnswerSource {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewError::AlreadyAnswered(_) => ErrorCode::AlreadyAnswered,
            InterviewError::NoSuchAttribute(_) => ErrorCode::AttributeNotFound,
            InterviewError::AnswerSource { .. } => ErrorCode::AnswerUnavailable,
        }
    }
}

impl From<InterviewError> for DomainError {
    fn from(err: InterviewError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_answered_maps_to_its_code() {
        let err = InterviewError::AlreadyAnswered("age".to_string());
        assert_eq!(err.code(), ErrorCode::AlreadyAnswered);
        assert_eq!(err.to_string(), "Attribute 'age' has already been answered");
    }

    #[test]
    fn answer_source_error_converts_to_domain_error() {
        let domain: DomainError = InterviewError::answer_source("age", "script has no entry").into();
        assert_eq!(domain.code, ErrorCode::AnswerUnavailable);
        assert!(domain.message.contains("script has no entry"));
    }
}
