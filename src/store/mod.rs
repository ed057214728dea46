//! 内容存储模块：按 (内容类型, 主题) 持久化生成结果。
//!
//! # Content Store
//!
//! Key-value persistence for generated documents, keyed by content kind and
//! topic id. Each key holds at most one [`StoredDocument`]; a write replaces
//! the previous document wholesale.
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`FirestoreStore`] | Google Cloud Firestore over its REST API |
//! | [`MemoryStore`] | In-process map for local runs and tests |

mod firestore;
mod memory;

pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::MemoryStore;

use crate::types::{ContentKind, StoredDocument};
use async_trait::async_trait;
use std::fmt;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Address of one stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    pub kind: ContentKind,
    pub topic_id: String,
}

impl StoreKey {
    pub fn new(kind: ContentKind, topic_id: impl Into<String>) -> Self {
        Self {
            kind,
            topic_id: topic_id.into(),
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.kind.namespace()
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.namespace(), self.topic_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("read of {key} failed: {message}")]
    Read { key: String, message: String },

    #[error("write of {key} failed: {message}")]
    Write { key: String, message: String },

    #[error("document {key} is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the document for `key`. `Ok(None)` means absent; an `Err` is
    /// a real failure and must not be read as a miss.
    async fn get(&self, key: &StoreKey) -> StoreResult<Option<StoredDocument>>;

    /// Replace whatever is stored under `key`.
    async fn put(&self, key: &StoreKey, document: &StoredDocument) -> StoreResult<()>;

    fn name(&self) -> &'static str;
}
