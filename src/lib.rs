//! # ai-learn-content
//!
//! 面向语言学习者的 AI 内容服务：按主题缓存生成结果，并在生成失败时回退到旧内容。
//!
//! AI-generated learning content (quizzes, exercises, study material) served
//! from a freshness-aware content cache.
//!
//! ## Overview
//!
//! Every request for a topic goes through one decision: serve what the store
//! already holds, regenerate it with the AI provider, or fall back to the
//! stale copy when regeneration fails. Everything else in this crate (HTTP
//! routing, prompt templates, the Gemini and Firestore clients) is plumbing
//! around that decision and is reached through traits so it can be swapped in
//! tests.
//!
//! ## Request Flow
//!
//! ```text
//! START → LOOKUP ─┬─ FRESH_HIT ──────────────────────────────► return content
//!                 └─ MISS_OR_STALE → GENERATE ─┬─ SUCCESS → PERSIST → return content
//!                                              └─ FAIL ─┬─ HAS_STALE → return content + warning
//!                                                       └─ NO_STALE  → error
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ai_learn_content::cache::{FreshnessConfig, FreshnessPolicy};
//! use ai_learn_content::generator::{GeminiConfig, GeminiGenerator};
//! use ai_learn_content::processors::QuizParser;
//! use ai_learn_content::service::ContentService;
//! use ai_learn_content::store::MemoryStore;
//! use ai_learn_content::types::ServiceParams;
//!
//! #[tokio::main]
//! async fn main() -> ai_learn_content::Result<()> {
//!     let generator = GeminiGenerator::new(GeminiConfig::new("your-api-key"))?;
//!     let quizzes = ContentService::new(
//!         QuizParser,
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(generator),
//!         FreshnessPolicy::new(FreshnessConfig::default()),
//!     );
//!
//!     let response = quizzes
//!         .get_or_create(&ServiceParams::new("Dativ", "Dative prepositions", "B1", "dativ-1"))
//!         .await?;
//!     println!("{} questions", response.content.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Freshness policy and orchestrator counters |
//! | [`service`] | Generic get-or-create orchestrator, one instance per content kind |
//! | [`store`] | Content store trait with Firestore and in-memory backends |
//! | [`generator`] | Content generator trait and the Gemini client |
//! | [`processors`] | Raw AI output cleanup, parsing and shape validation |
//! | [`prompts`] | Prompt templates per content kind |
//! | [`types`] | Metadata, documents, request/response and payload types |
//! | [`api`] | axum HTTP boundary |
//! | [`config`] | File and environment configuration |
//! | [`telemetry`] | `tracing` subscriber setup |
//! | [`transport`] | Shared reqwest client builder and HTTP error mapping |

pub mod api;
pub mod cache;
pub mod config;
pub mod generator;
pub mod processors;
pub mod prompts;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod transport;
pub mod types;

pub use cache::{FreshnessConfig, FreshnessPolicy};
pub use config::AppConfig;
pub use service::ContentService;
pub use types::{ContentKind, ContentMetadata, ServiceParams, ServiceResponse, StoredDocument};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
