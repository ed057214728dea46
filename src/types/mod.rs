//! 类型模块：内容元数据、存储文档、请求参数与三种内容载荷。
//!
//! # Types Module
//!
//! Data model shared by the freshness policy, the orchestrator, the stores and
//! the HTTP boundary.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ContentKind`] | Quiz, exercise or study; picks namespace, prompt and parser |
//! | [`ContentMetadata`] | Generation timestamp, confidence and topic fields |
//! | [`StoredDocument`] | Payload plus metadata, one per (kind, topic) |
//! | [`ServiceParams`] | Per-request inputs, including the optional confidence override |
//! | [`ServiceResponse`] | Content with an optional stale-data warning |
//!
//! ## Payloads
//!
//! | Kind | Payload |
//! |------|---------|
//! | quiz | `Vec<`[`QuizQuestion`]`>` |
//! | exercise | `Vec<`[`Exercise`]`>` |
//! | study | [`StudyMaterial`] |

pub mod content;
pub mod document;

pub use content::{ContentKind, Exercise, QuizQuestion, StudyMaterial};
pub use document::{
    ContentMetadata, ServiceParams, ServiceResponse, StoredDocument, DEFAULT_LEVEL, STALE_WARNING,
};
