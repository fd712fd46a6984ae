//! Answers supplied for attributes during an interview.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value supplied for one attribute.
///
/// Numbers answer numerical attributes, labels answer categorical ones. A
/// value of the wrong shape is not an error; it fails every test it meets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Label(String),
}

impl AnswerValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            AnswerValue::Label(label) => Some(label),
            AnswerValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Label(label) => f.write_str(label),
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Label(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Label(value)
    }
}

/// A newly collected answer: attribute title plus value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub attribute: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(attribute: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Shorthand for a categorical answer.
    pub fn label(attribute: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(attribute, AnswerValue::Label(label.into()))
    }

    /// Shorthand for a numerical answer.
    pub fn number(attribute: impl Into<String>, value: f64) -> Self {
        Self::new(attribute, AnswerValue::Number(value))
    }
}
