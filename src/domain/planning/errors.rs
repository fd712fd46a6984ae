//! Errors raised while precomputing interview plans.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    #[error("Relation would hold up to {bound} rows, above the limit of {limit}")]
    RelationTooLarge { bound: usize, limit: usize },

    #[error("Relation column '{0}' is not a registered attribute")]
    UnknownAttribute(String),
}

impl PlanningError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanningError::RelationTooLarge { .. } => ErrorCode::RelationTooLarge,
            PlanningError::UnknownAttribute(_) => ErrorCode::AttributeNotFound,
        }
    }
}

impl From<PlanningError> for DomainError {
    fn from(err: PlanningError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            PlanningError::RelationTooLarge { bound, limit } => domain
                .with_detail("bound", bound.to_string())
                .with_detail("limit", limit.to_string()),
            PlanningError::UnknownAttribute(title) => domain.with_detail("attribute", title),
        }
    }
}
