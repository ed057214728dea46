//! Gemini generateContent client.
//!
//! Request: `POST {base}/v1beta/models/{model}:generateContent?key=...` with
//! `contents: [{role: "user", parts: [{text}]}]`.
//! Response: the text lives at `candidates[0].content.parts[0].text`.

use super::ContentGenerator;
use crate::transport::{build_client, HttpClientConfig, TransportError};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const SOURCE: &str = "gemini";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub http: HttpClientConfig,
}

// Keep the key out of Debug output.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpClientConfig::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }
}

pub struct GeminiGenerator {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Gemini API key is empty",
                ErrorContext::new().with_field_path("gemini.api_key"),
            ));
        }

        let mut endpoint = Url::parse(&config.base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid Gemini base url",
                ErrorContext::new()
                    .with_field_path("gemini.base_url")
                    .with_details(e.to_string()),
            )
        })?;
        let action = format!("{}:generateContent", config.model);
        endpoint
            .path_segments_mut()
            .map_err(|_| {
                Error::configuration_with_context(
                    "Gemini base url cannot carry a path",
                    ErrorContext::new().with_field_path("gemini.base_url"),
                )
            })?
            .pop_if_empty()
            .extend(["v1beta", "models", action.as_str()]);
        endpoint.query_pairs_mut().append_pair("key", &config.api_key);

        Ok(Self {
            client: build_client(&config.http)?,
            endpoint,
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }]
        })
    }

    fn extract_text(body: &Value) -> Result<String> {
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if !text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let reason = body
            .pointer("/promptFeedback/blockReason")
            .or_else(|| body.pointer("/candidates/0/finishReason"))
            .and_then(|v| v.as_str())
            .unwrap_or("no text in response");
        Err(Error::generation(
            format!("No content received from Gemini API ({reason})"),
            SOURCE,
        ))
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling gemini");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&Self::request_body(prompt))
            .send()
            .await
            // the url carries the api key
            .map_err(|e| Error::generation(TransportError::from(e.without_url()).to_string(), SOURCE))?;

        if !resp.status().is_success() {
            let err = TransportError::from_response(resp).await;
            tracing::error!(model = %self.model, error = %err, "gemini returned an error status");
            return Err(Error::generation(err.to_string(), SOURCE));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| {
                Error::generation(format!("unreadable response: {}", e.without_url()), SOURCE)
            })?;
        Self::extract_text(&body)
    }

    fn name(&self) -> &'static str {
        SOURCE
    }
}
