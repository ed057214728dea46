//! 内容解析模块：把模型原始输出解析并校验为结构化内容。
//!
//! # Content Processors
//!
//! Raw model text goes through three steps before it can be stored:
//!
//! 1. markdown fences are stripped ([`strip_code_fences`]);
//! 2. the remainder must be valid JSON, otherwise
//!    `Invalid JSON format from AI for <kind>: <reason>`;
//! 3. the JSON must match the kind's payload shape, otherwise
//!    `Generated content is not a valid <kind> ... structure.`
//!
//! Both failures are [`Error::MalformedOutput`], which the orchestrator
//! treats like a failed generation.

mod cleaner;
mod exercise;
mod quiz;
mod study;

pub use cleaner::strip_code_fences;
pub use exercise::ExerciseParser;
pub use quiz::QuizParser;
pub use study::StudyParser;

use crate::types::ContentKind;
use crate::{Error, ErrorContext, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Turns raw generator output into a validated payload for one content kind.
pub trait ContentParser: Send + Sync + 'static {
    type Payload: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    fn kind(&self) -> ContentKind;

    fn parse(&self, raw: &str) -> Result<Self::Payload>;
}

/// Shared clean → JSON → typed pipeline. `is_valid` runs on the typed value
/// for checks serde cannot express (non-empty lists, option counts).
pub(crate) fn parse_payload<T, F>(
    kind: ContentKind,
    raw: &str,
    shape_message: &str,
    is_valid: F,
) -> Result<T>
where
    T: DeserializeOwned,
    F: FnOnce(&T) -> bool,
{
    let cleaned = strip_code_fences(raw);
    tracing::trace!(kind = %kind, len = cleaned.len(), "parsing generated content");

    let value: serde_json::Value = serde_json::from_str(cleaned.trim()).map_err(|e| {
        Error::malformed_with_context(
            format!("Invalid JSON format from AI for {kind}: {e}"),
            ErrorContext::new().with_source(format!("{kind}_parser")),
        )
    })?;

    let shape_error = |details: String| {
        Error::malformed_with_context(
            shape_message,
            ErrorContext::new()
                .with_details(details)
                .with_source(format!("{kind}_parser")),
        )
    };

    let typed: T = serde_json::from_value(value).map_err(|e| shape_error(e.to_string()))?;
    if !is_valid(&typed) {
        return Err(shape_error("constraint check failed".to_string()));
    }
    Ok(typed)
}
