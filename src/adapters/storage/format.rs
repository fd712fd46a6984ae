//! Document formats understood by the file-backed adapters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Errors from encoding or decoding a document
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// On-disk encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` is JSON, `.yaml` and `.yml` are YAML, anything else is unsupported
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError> {
        Ok(match self {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }

    pub fn encode<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        Ok(match self {
            DocumentFormat::Json => serde_json::to_string_pretty(value)?,
            DocumentFormat::Yaml => serde_yaml::to_string(value)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/catalog.json")), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_path(Path::new("catalog.YML")), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path(Path::new("catalog.toml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("catalog")), None);
    }

    #[test]
    fn yaml_and_json_decode_the_same_value() {
        let from_json: BTreeMap<String, f64> = DocumentFormat::Json.decode(r#"{"age": 30}"#).unwrap();
        let from_yaml: BTreeMap<String, f64> = DocumentFormat::Yaml.decode("age: 30\n").unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn decode_reports_malformed_input() {
        let result: Result<BTreeMap<String, f64>, _> = DocumentFormat::Json.decode("{");
        assert!(matches!(result, Err(CodecError::Json(_))));
    }
}
