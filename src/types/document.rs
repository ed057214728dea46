//! Cached documents, their metadata, and the per-request service types.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Warning attached to a response that serves cached content after a failed regeneration.
pub const STALE_WARNING: &str = "AI API call failed, served stale data.";

/// Level used when a request does not name one.
pub const DEFAULT_LEVEL: &str = "B1";

/// Metadata stamped on every generated document. Never mutated; a
/// regeneration writes a whole new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub generated_at: DateTime<Utc>,
    /// In `[0, 1]`.
    pub confidence_score: f64,
    pub topic_id: String,
    pub level: String,
    pub title: String,
    pub description: String,
}

impl ContentMetadata {
    /// Age in fractional hours relative to `now`. Negative when the
    /// timestamp lies in the future.
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.generated_at).num_milliseconds() as f64 / 3_600_000.0
    }
}

/// A stored payload and its metadata. Stores work with the untyped
/// `StoredDocument<serde_json::Value>`; services decode into their payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument<T = serde_json::Value> {
    pub content: T,
    #[serde(rename = "_metadata")]
    pub metadata: ContentMetadata,
}

impl<T> StoredDocument<T> {
    pub fn new(content: T, metadata: ContentMetadata) -> Self {
        Self { content, metadata }
    }
}

impl<T: Serialize> StoredDocument<T> {
    pub fn to_untyped(&self) -> serde_json::Result<StoredDocument> {
        Ok(StoredDocument {
            content: serde_json::to_value(&self.content)?,
            metadata: self.metadata.clone(),
        })
    }
}

impl StoredDocument {
    pub fn decode<T: DeserializeOwned>(self) -> serde_json::Result<StoredDocument<T>> {
        Ok(StoredDocument {
            content: serde_json::from_value(self.content)?,
            metadata: self.metadata,
        })
    }
}

/// Inputs of one get-or-create call.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceParams {
    pub title: String,
    pub description: String,
    pub level: String,
    pub topic_id: String,
    /// Client-asserted confidence. Overrides the stored score for the
    /// freshness decision only; never persisted.
    pub confidence: Option<f64>,
}

impl ServiceParams {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        level: impl Into<String>,
        topic_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: level.into(),
            topic_id: topic_id.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResponse<T> {
    pub content: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T> ServiceResponse<T> {
    pub fn fresh(content: T) -> Self {
        Self {
            content,
            warning: None,
        }
    }

    pub fn stale(content: T) -> Self {
        Self {
            content,
            warning: Some(STALE_WARNING.to_string()),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.warning.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn metadata(generated_at: DateTime<Utc>) -> ContentMetadata {
        ContentMetadata {
            generated_at,
            confidence_score: 1.0,
            topic_id: "t".into(),
            level: "B1".into(),
            title: "T".into(),
            description: "D".into(),
        }
    }

    #[test]
    fn age_is_fractional() {
        let now = Utc::now();
        let meta = metadata(now - Duration::minutes(90));
        assert!((meta.age_hours(now) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn document_wire_format_matches_store_layout() {
        let doc: StoredDocument = serde_json::from_value(json!({
            "content": [{"question": "Q", "options": ["a", "b", "c", "d"], "answer": "a"}],
            "_metadata": {
                "generatedAt": "2024-05-01T10:00:00.000Z",
                "confidenceScore": 0.5,
                "topicId": "t",
                "level": "A2",
                "title": "T",
                "description": "D"
            }
        }))
        .unwrap();
        assert_eq!(doc.metadata.confidence_score, 0.5);
        assert_eq!(doc.metadata.level, "A2");

        let typed: StoredDocument<Vec<crate::types::QuizQuestion>> = doc.clone().decode().unwrap();
        assert_eq!(typed.content[0].answer, "a");
        assert_eq!(typed.to_untyped().unwrap().metadata, doc.metadata);
    }

    #[test]
    fn warning_only_on_stale() {
        let fresh = ServiceResponse::fresh(1);
        assert!(!fresh.is_stale());
        assert!(serde_json::to_value(&fresh).unwrap().get("warning").is_none());

        let stale = ServiceResponse::stale(1);
        assert!(stale.warning.as_deref().unwrap().contains("served stale data"));
    }
}
