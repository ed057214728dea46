//! Firestore REST backend.
//!
//! Documents live at
//! `projects/{project}/databases/{database}/documents/{namespace}/{topicId}`
//! with two top-level fields, `content` and `_metadata`. Reads are a plain
//! `GET` (404 means absent); writes are a `PATCH` without an update mask,
//! which replaces the whole document.

use super::{ContentStore, StoreError, StoreKey, StoreResult};
use crate::transport::{build_client, HttpClientConfig, TransportError};
use crate::types::StoredDocument;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    pub base_url: String,
    /// OAuth bearer token. Not needed against the emulator.
    pub access_token: Option<String>,
    pub http: HttpClientConfig,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: "(default)".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            http: HttpClientConfig::default(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Point at a local emulator (`host:port`, as in `FIRESTORE_EMULATOR_HOST`).
    pub fn with_emulator_host(self, host: &str) -> Self {
        self.with_base_url(format!("http://{}", host.trim_end_matches('/')))
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

pub struct FirestoreStore {
    client: reqwest::Client,
    base: Url,
    config: FirestoreConfig,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid Firestore base url",
                ErrorContext::new()
                    .with_field_path("store.firestore.base_url")
                    .with_details(e.to_string()),
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::configuration_with_context(
                "Firestore base url cannot carry a path",
                ErrorContext::new().with_field_path("store.firestore.base_url"),
            ));
        }
        let client = build_client(&config.http)?;
        Ok(Self {
            client,
            base,
            config,
        })
    }

    fn document_url(&self, key: &StoreKey) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new(), so this branch always runs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "v1",
                "projects",
                self.config.project_id.as_str(),
                "databases",
                self.config.database.as_str(),
                "documents",
                key.namespace(),
                key.topic_id.as_str(),
            ]);
        }
        url
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl ContentStore for FirestoreStore {
    async fn get(&self, key: &StoreKey) -> StoreResult<Option<StoredDocument>> {
        let read_err = |message: String| StoreError::Read {
            key: key.to_string(),
            message,
        };

        let resp = self
            .authorize(self.client.get(self.document_url(key)))
            .send()
            .await
            .map_err(|e| read_err(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let err = TransportError::from_response(resp).await;
            return Err(read_err(err.to_string()));
        }

        let body: Value = resp.json().await.map_err(|e| read_err(e.to_string()))?;
        let corrupt = |message: String| StoreError::Corrupt {
            key: key.to_string(),
            message,
        };
        let fields = body
            .get("fields")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let plain = decode_fields(&fields).map_err(corrupt)?;
        let doc = serde_json::from_value(plain).map_err(|e| corrupt(e.to_string()))?;
        tracing::debug!(key = %key, "firestore document loaded");
        Ok(Some(doc))
    }

    async fn put(&self, key: &StoreKey, document: &StoredDocument) -> StoreResult<()> {
        let write_err = |message: String| StoreError::Write {
            key: key.to_string(),
            message,
        };

        let plain = serde_json::to_value(document).map_err(|e| write_err(e.to_string()))?;
        let body = json!({ "fields": encode_fields(&plain) });

        let resp = self
            .authorize(self.client.patch(self.document_url(key)).json(&body))
            .send()
            .await
            .map_err(|e| write_err(e.to_string()))?;

        if !resp.status().is_success() {
            let err = TransportError::from_response(resp).await;
            return Err(write_err(err.to_string()));
        }
        tracing::info!(key = %key, "content saved to firestore");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "firestore"
    }
}

/// Top-level object → Firestore `fields` map.
fn encode_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect(),
        ),
        other => json!({ "value": encode_value(other) }),
    }
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or(0.0) })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            if items.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
            }
        }
        Value::Object(_) => json!({ "mapValue": { "fields": encode_fields(value) } }),
    }
}

fn decode_fields(fields: &Value) -> std::result::Result<Value, String> {
    let map = fields
        .as_object()
        .ok_or_else(|| "fields is not an object".to_string())?;
    let mut out = Map::with_capacity(map.len());
    for (k, v) in map {
        out.insert(k.clone(), decode_value(v).map_err(|e| format!("{k}: {e}"))?);
    }
    Ok(Value::Object(out))
}

fn decode_value(value: &Value) -> std::result::Result<Value, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "typed value is not an object".to_string())?;
    let (tag, inner) = obj
        .iter()
        .next()
        .ok_or_else(|| "empty typed value".to_string())?;

    match tag.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| "booleanValue is not a bool".to_string()),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(Value::from)
                .ok_or_else(|| format!("bad integerValue {inner}"))
        }
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            // NaN and infinities arrive as strings; JSON has no place for them
            Value::String(_) => Ok(Value::Null),
            _ => Err(format!("bad doubleValue {inner}")),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| format!("{tag} is not a string")),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|vs| vs.iter().map(decode_value).collect::<std::result::Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => match inner.get("fields") {
            Some(fields) => decode_fields(fields),
            None => Ok(Value::Object(Map::new())),
        },
        other => Err(format!("unsupported value type {other}")),
    }
}
