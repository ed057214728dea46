use super::{ContentStore, StoreError, StoreKey, StoreResult};
use crate::types::StoredDocument;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-process store. No eviction and no size bound; documents live until
/// overwritten or the process exits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<StoreKey, StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(key: &StoreKey) -> String {
    format!("memory store lock poisoned while accessing {key}")
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get(&self, key: &StoreKey) -> StoreResult<Option<StoredDocument>> {
        let documents = self.documents.read().map_err(|_| StoreError::Read {
            key: key.to_string(),
            message: poisoned(key),
        })?;
        Ok(documents.get(key).cloned())
    }

    async fn put(&self, key: &StoreKey, document: &StoredDocument) -> StoreResult<()> {
        let mut documents = self.documents.write().map_err(|_| StoreError::Write {
            key: key.to_string(),
            message: poisoned(key),
        })?;
        documents.insert(key.clone(), document.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
