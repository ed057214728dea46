//! 内容生成模块：把渲染好的提示词发送给 AI 服务并返回原始文本。
//!
//! # Content Generator
//!
//! A generator takes a rendered prompt and returns the model's raw text.
//! Any failure (transport, non-2xx status, empty answer) surfaces as
//! [`Error::Generation`](crate::Error::Generation) carrying the public message
//! `Failed to generate content from AI service.` with the cause in its
//! context. Parsing is not the generator's job.

mod gemini;

pub use gemini::{GeminiConfig, GeminiGenerator, DEFAULT_GEMINI_MODEL};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}
