//! Scripted Answer Source Adapter
//!
//! Answers questions from a prepared script mapping attribute titles to
//! values. Scripts can be loaded from JSON or YAML files, which makes the
//! adapter suitable for batch runs as well as tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use tokio::fs;

use crate::adapters::storage::DocumentFormat;
use crate::domain::catalog::{AnswerValue, Attribute};
use crate::ports::{AnswerSource, AnswerSourceError};

/// Errors that can occur while loading an answer script
#[derive(Debug, thiserror::Error)]
pub enum AnswerScriptError {
    #[error("Answer script not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to decode answer script: {0}")]
    Decode(String),

    #[error("Unsupported answer script format: {0}")]
    UnsupportedFormat(String),
}

/// Prepared answers keyed by attribute title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerScript {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an answer, replacing any previous one for the same attribute
    pub fn with(mut self, title: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.answers.insert(title.into(), value.into());
        self
    }

    pub fn get(&self, title: &str) -> Option<&AnswerValue> {
        self.answers.get(title)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Load a script from a `.json`, `.yaml` or `.yml` file
    pub async fn load(path: &Path) -> Result<Self, AnswerScriptError> {
        let display = path.display().to_string();
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| AnswerScriptError::UnsupportedFormat(display.clone()))?;

        let present = fs::try_exists(path)
            .await
            .map_err(|e| AnswerScriptError::Io(e.to_string()))?;
        if !present {
            return Err(AnswerScriptError::NotFound(display));
        }

        let text = fs::read_to_string(path)
            .await
            .map_err(|e| AnswerScriptError::Io(e.to_string()))?;

        format
            .decode(&text)
            .map_err(|e| AnswerScriptError::Decode(e.to_string()))
    }
}

/// Answer source backed by an [`AnswerScript`]
#[derive(Debug, Default)]
pub struct ScriptedAnswerSource {
    script: AnswerScript,
    asked: Mutex<Vec<String>>,
}

impl ScriptedAnswerSource {
    pub fn new(script: AnswerScript) -> Self {
        Self {
            script,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Titles asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }

    fn lookup(&self, attribute: &Attribute) -> Result<&AnswerValue, AnswerSourceError> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(attribute.title().to_string());
        }
        self.script
            .get(attribute.title())
            .ok_or_else(|| AnswerSourceError::Unanswered(attribute.title().to_string()))
    }
}

impl AnswerSource for ScriptedAnswerSource {
    fn ask_categorical(&self, attribute: &Attribute) -> Result<String, AnswerSourceError> {
        // A number is passed on as a label; it will simply match no option.
        Ok(self.lookup(attribute)?.to_string())
    }

    fn ask_numeric(&self, attribute: &Attribute) -> Result<f64, AnswerSourceError> {
        match self.lookup(attribute)? {
            AnswerValue::Number(value) => Ok(*value),
            AnswerValue::Label(label) => label.trim().parse().map_err(|_| AnswerSourceError::WrongShape {
                attribute: attribute.title().to_string(),
                expected: "a number",
            }),
        }
    }
}
