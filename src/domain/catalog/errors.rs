//! Load-time errors for the attribute registry and benefit catalog.
//!
//! Every variant is fatal: a catalog that fails to build is rejected before
//! any evaluation starts.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Structural errors raised while assembling a catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Benefit '{benefit}' references unknown attribute '{title}'")]
    UnknownAttribute { benefit: String, title: String },

    #[error("Attribute '{0}' is defined more than once")]
    DuplicateAttribute(String),

    #[error("Benefit '{0}' is defined more than once")]
    DuplicateBenefit(String),

    #[error("Attribute '{title}' is {actual}, but the requirement expects {expected}")]
    AttributeKindMismatch {
        title: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Unsupported comparison operator '{0}'")]
    UnsupportedOperator(String),

    #[error("Invalid required value for '{title}': {reason}")]
    InvalidRequiredValue { title: String, reason: String },

    #[error("Attribute '{title}' has an invalid domain [{min}, {max}]")]
    InvalidDomain { title: String, min: f64, max: f64 },

    #[error("Categorical attribute '{0}' has no usable answer options")]
    EmptyAnswerOptions(String),

    #[error("Field '{0}' cannot be empty")]
    EmptyName(&'static str),
}

impl CatalogError {
    /// Creates an invalid required value error.
    pub fn invalid_required_value(title: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidRequiredValue {
            title: title.into(),
            reason: reason.into(),
        }
    }

    /// Maps the error onto the shared error code vocabulary.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::UnknownAttribute { .. } => ErrorCode::UnknownAttributeReference,
            CatalogError::DuplicateAttribute(_) | CatalogError::DuplicateBenefit(_) => {
                ErrorCode::DuplicateDefinition
            }
            CatalogError::UnsupportedOperator(_) => ErrorCode::UnsupportedVariant,
            CatalogError::EmptyName(_) => ErrorCode::EmptyField,
            CatalogError::AttributeKindMismatch { .. }
            | CatalogError::InvalidRequiredValue { .. }
            | CatalogError::InvalidDomain { .. }
            | CatalogError::EmptyAnswerOptions(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_attribute_names_benefit_and_title() {
        let err = CatalogError::UnknownAttribute {
            benefit: "Housing".to_string(),
            title: "income".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Benefit 'Housing' references unknown attribute 'income'"
        );
        assert_eq!(err.code(), ErrorCode::UnknownAttributeReference);
    }

    #[test]
    fn unsupported_operator_maps_to_unsupported_variant() {
        let err = CatalogError::UnsupportedOperator("<".to_string());
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::UnsupportedVariant);
        assert!(domain.message.contains("'<'"));
    }
}
