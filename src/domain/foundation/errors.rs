//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and local edits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidFormat,

    // Not found errors
    AttributeNotFound,
    CatalogNotFound,

    // Load errors
    UnknownAttributeReference,
    UnsupportedVariant,
    DuplicateDefinition,

    // Interview errors
    AlreadyAnswered,
    AnswerUnavailable,

    // Planning errors
    RelationTooLarge,

    // Infrastructure errors
    StorageError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::AttributeNotFound => "ATTRIBUTE_NOT_FOUND",
            ErrorCode::CatalogNotFound => "CATALOG_NOT_FOUND",
            ErrorCode::UnknownAttributeReference => "UNKNOWN_ATTRIBUTE_REFERENCE",
            ErrorCode::UnsupportedVariant => "UNSUPPORTED_VARIANT",
            ErrorCode::DuplicateDefinition => "DUPLICATE_DEFINITION",
            ErrorCode::AlreadyAnswered => "ALREADY_ANSWERED",
            ErrorCode::AnswerUnavailable => "ANSWER_UNAVAILABLE",
            ErrorCode::RelationTooLarge => "RELATION_TOO_LARGE",
            ErrorCode::StorageError => "STORAGE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}
