//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, and error types that form the
//! vocabulary shared by the catalog, planning and interview modules.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::InterviewId;
pub use timestamp::Timestamp;
