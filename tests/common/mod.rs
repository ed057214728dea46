//! Shared fakes for the integration tests.
#![allow(dead_code)]

use ai_learn_content::cache::{FreshnessConfig, FreshnessPolicy};
use ai_learn_content::generator::ContentGenerator;
use ai_learn_content::processors::ContentParser;
use ai_learn_content::service::ContentService;
use ai_learn_content::store::{ContentStore, MemoryStore, StoreError, StoreKey, StoreResult};
use ai_learn_content::types::{ContentKind, ServiceParams, StoredDocument};
use ai_learn_content::{Error, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ONE_QUESTION_QUIZ: &str =
    r#"[{"question": "Q1", "options": ["a", "b", "c", "d"], "answer": "a", "explanation": "e"}]"#;

pub const TWO_QUESTION_QUIZ: &str = r#"```json
[
  {"question": "N1", "options": ["a", "b", "c", "d"], "answer": "b"},
  {"question": "N2", "options": ["a", "b", "c", "d"], "answer": "c"}
]
```"#;

pub const EXERCISES: &str = r#"[{"type": "fill-in-the-blanks", "instruction": "Fill", "content": "Ich ___ müde.", "solution": "bin"}]"#;

pub const STUDY: &str = r#"{"summary": "S", "keyConcepts": ["k"], "examples": ["e"], "tips": ["t"]}"#;

/// Memory store that counts calls and can be told to fail.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    gets: AtomicUsize,
    puts: AtomicUsize,
    fail_get: AtomicBool,
    fail_put: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self) {
        self.fail_get.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_put.store(true, Ordering::SeqCst);
    }

    /// Insert a document directly, bypassing the put counter.
    pub async fn seed(
        &self,
        kind: ContentKind,
        topic: &str,
        content: Value,
        age: Duration,
        confidence: f64,
    ) {
        let params = ServiceParams::new("Old title", "Old description", "A1", topic);
        let metadata = FreshnessPolicy::new_metadata_at(&params, confidence, Utc::now() - age);
        self.inner
            .put(&StoreKey::new(kind, topic), &StoredDocument::new(content, metadata))
            .await
            .unwrap();
    }

    pub async fn stored(&self, kind: ContentKind, topic: &str) -> Option<StoredDocument> {
        self.inner.get(&StoreKey::new(kind, topic)).await.unwrap()
    }
}

#[async_trait]
impl ContentStore for CountingStore {
    async fn get(&self, key: &StoreKey) -> StoreResult<Option<StoredDocument>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StoreError::Read {
                key: key.to_string(),
                message: "deadline exceeded".into(),
            });
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &StoreKey, document: &StoredDocument) -> StoreResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                key: key.to_string(),
                message: "permission denied".into(),
            });
        }
        self.inner.put(key, document).await
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Generator that replays a configured reply and records prompts.
pub struct ScriptedGenerator {
    reply: Mutex<Option<String>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(text.to_string())),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(None),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn set_reply(&self, text: Option<&str>) {
        *self.reply.lock().unwrap() = text.map(str::to_string);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.reply.lock().unwrap().clone();
        reply.ok_or_else(|| Error::generation("provider unavailable", "scripted"))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn service<P: ContentParser>(
    parser: P,
    store: &Arc<CountingStore>,
    generator: &Arc<ScriptedGenerator>,
) -> ContentService<P> {
    ContentService::new(
        parser,
        store.clone(),
        generator.clone(),
        FreshnessPolicy::new(FreshnessConfig::default()),
    )
}

pub fn params(topic: &str) -> ServiceParams {
    ServiceParams::new("T", "D", "B1", topic)
}
