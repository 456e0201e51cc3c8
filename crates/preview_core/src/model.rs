use serde::{Deserialize, Serialize};

use crate::ValidatedUrl;

/// Metadata shown for a page. Absent fields mean the page had no such metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewRecord {
    /// Final URL after redirects.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PreviewRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unreachable: {0}")]
    Unreachable(String),
    #[error("parse failure: {0}")]
    ParseFailure(String),
}

/// A fetch the orchestrator decided to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub url: ValidatedUrl,
}

#[cfg(test)]
mod tests {
    use super::PreviewRecord;

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let record = PreviewRecord {
            title: Some("Hello".to_string()),
            ..PreviewRecord::new("https://example.com/")
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"url":"https://example.com/","title":"Hello"}"#);
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let record: PreviewRecord = serde_json::from_str(r#"{"url":"https://a.test/"}"#).unwrap();
        assert_eq!(record, PreviewRecord::new("https://a.test/"));
    }
}
