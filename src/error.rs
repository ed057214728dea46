use crate::store::StoreError;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "body.title", "freshness.min_confidence_for_regen")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., provider status, parser message)
    pub details: Option<String>,
    /// Source of the error (e.g., "gemini", "quiz_parser")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Message surfaced when the AI provider could not produce content.
pub const GENERATION_FAILED: &str = "Failed to generate content from AI service.";

/// Unified error type for the content service.
///
/// `Generation` and `MalformedOutput` are the two failures the orchestrator
/// may recover from with a stale fallback; everything else propagates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("{message}{}", format_context(.context))]
    Generation {
        message: String,
        context: ErrorContext,
    },

    #[error("{message}{}", format_context(.context))]
    MalformedOutput {
        message: String,
        context: ErrorContext,
    },

    #[error("Content store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a request validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Generator transport/provider failure. The message is always
    /// [`GENERATION_FAILED`]; the cause goes into the context.
    pub fn generation(details: impl Into<String>, source: impl Into<String>) -> Self {
        Error::Generation {
            message: GENERATION_FAILED.to_string(),
            context: ErrorContext::new()
                .with_details(details)
                .with_source(source),
        }
    }

    /// Create a malformed-output error with structured context
    pub fn malformed_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedOutput {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// True for failures that a cached document may stand in for.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Error::Generation { .. } | Error::MalformedOutput { .. })
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. }
            | Error::Generation { context, .. }
            | Error::MalformedOutput { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
