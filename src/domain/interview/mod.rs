//! Interview module - One subject's run through the catalog.

mod answers;
mod errors;
mod session;

pub use answers::{AnswerSet, RecordedAnswer};
pub use errors::InterviewError;
pub use session::InterviewSession;
