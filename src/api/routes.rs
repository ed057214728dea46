//! Content routes, generic over the content kind.
//!
//! ```text
//! POST /            generate or fetch content for a topic
//! GET  /:topic_id   fetch stored content, no freshness check
//! ```

use super::error::ApiError;
use crate::processors::ContentParser;
use crate::service::ContentService;
use crate::types::{ServiceParams, DEFAULT_LEVEL};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const REQUIRED_FIELDS_MESSAGE: &str = "title, description, and topicId are required";

/// POST body. Everything is optional at the type level so that missing
/// fields produce the documented message instead of a serde rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    #[serde(alias = "topicId")]
    pub id: Option<String>,
    pub confidence: Option<f64>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

impl ContentRequest {
    pub fn into_params(self) -> Result<ServiceParams, ApiError> {
        let (Some(title), Some(description), Some(topic_id)) = (
            present(self.title),
            present(self.description),
            present(self.id),
        ) else {
            return Err(ApiError::invalid_input(REQUIRED_FIELDS_MESSAGE));
        };

        let level = present(self.level).unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        let mut params = ServiceParams::new(title, description, level, topic_id);

        if let Some(confidence) = self.confidence {
            if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
                return Err(ApiError::invalid_input(
                    "confidence must be a number between 0 and 1",
                ));
            }
            params = params.with_confidence(confidence);
        }
        Ok(params)
    }
}

/// `{success: true, <kind>: content, warning?}`
fn success_body<T: Serialize>(
    key: &str,
    content: &T,
    warning: Option<String>,
) -> Result<Value, ApiError> {
    let content = serde_json::to_value(content)
        .map_err(|e| ApiError::from(crate::Error::Serialization(e)))?;
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(key.to_string(), content);
    if let Some(w) = warning {
        body.insert("warning".to_string(), Value::String(w));
    }
    Ok(Value::Object(body))
}

async fn generate_or_get<P: ContentParser>(
    State(service): State<Arc<ContentService<P>>>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
    let params = request.into_params()?;

    let response = service.get_or_create(&params).await?;
    Ok(Json(success_body(
        service.kind().as_str(),
        &response.content,
        response.warning,
    )?))
}

async fn get_by_id<P: ContentParser>(
    State(service): State<Arc<ContentService<P>>>,
    Path(topic_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let kind = service.kind();
    match service.get_by_id(&topic_id).await? {
        Some(content) => Ok(Json(success_body(kind.as_str(), &content, None)?)),
        None => Err(ApiError::not_found(kind.not_found_message())),
    }
}

/// Routes for one content kind, to be nested under `/api/learn/<kind>`.
pub fn content_routes<P: ContentParser>(service: Arc<ContentService<P>>) -> Router {
    Router::new()
        .route("/", post(generate_or_get::<P>))
        .route("/:topic_id", get(get_by_id::<P>))
        .with_state(service)
}
