//! Answer Adapters
//!
//! Implementations of the AnswerSource port.

mod scripted_answer_source;

pub use scripted_answer_source::{AnswerScript, AnswerScriptError, ScriptedAnswerSource};
