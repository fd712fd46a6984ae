//! Interview configuration

use serde::Deserialize;

/// Interview configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct InterviewConfig {
    /// Answer script consulted instead of a live subject
    pub answers_path: Option<String>,
}
