use crate::cache::{ContentStats, FreshnessPolicy, Outcome, StatsRecorder};
use crate::generator::ContentGenerator;
use crate::processors::ContentParser;
use crate::store::{ContentStore, StoreError, StoreKey};
use crate::types::{ContentKind, ServiceParams, ServiceResponse, StoredDocument};
use crate::{Error, Result};
use std::sync::Arc;

/// Confidence stamped on freshly generated content.
const FRESH_CONFIDENCE: f64 = 1.0;

/// Get-or-create orchestrator for one content kind.
///
/// Stateless per request apart from the outcome counters. Two concurrent
/// calls for the same topic may both generate; the later write wins.
pub struct ContentService<P: ContentParser> {
    parser: P,
    store: Arc<dyn ContentStore>,
    generator: Arc<dyn ContentGenerator>,
    policy: FreshnessPolicy,
    stats: StatsRecorder,
}

impl<P: ContentParser> ContentService<P> {
    pub fn new(
        parser: P,
        store: Arc<dyn ContentStore>,
        generator: Arc<dyn ContentGenerator>,
        policy: FreshnessPolicy,
    ) -> Self {
        Self {
            parser,
            store,
            generator,
            policy,
            stats: StatsRecorder::new(),
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.parser.kind()
    }

    pub fn policy(&self) -> &FreshnessPolicy {
        &self.policy
    }

    pub fn stats(&self) -> ContentStats {
        self.stats.snapshot()
    }

    /// Serve cached content when it is fresh and confident enough; otherwise
    /// generate, persist and serve new content, falling back to the cached
    /// copy (with a warning) when generation fails.
    pub async fn get_or_create(
        &self,
        params: &ServiceParams,
    ) -> Result<ServiceResponse<P::Payload>> {
        let key = StoreKey::new(self.kind(), params.topic_id.as_str());

        let cached = match self.load(&key).await {
            Ok(doc) => doc,
            // An undecodable entry is no fallback; regenerating overwrites it.
            Err(Error::Store(e @ StoreError::Corrupt { .. })) => {
                tracing::warn!(key = %key, error = %e, "cached content is unreadable, regenerating");
                None
            }
            Err(e) => {
                self.stats.record(Outcome::Failed);
                tracing::error!(key = %key, error = %e, "content lookup failed");
                return Err(e);
            }
        };

        let regenerate = self
            .policy
            .should_regenerate(cached.as_ref().map(|d| &d.metadata), params.confidence);
        if let (false, Some(doc)) = (regenerate, cached.as_ref()) {
            self.stats.record(Outcome::FreshHit);
            tracing::debug!(key = %key, "serving cached content");
            return Ok(ServiceResponse::fresh(doc.content.clone()));
        }

        self.stats.record_miss();
        tracing::debug!(
            key = %key,
            cached = cached.is_some(),
            "content missing, stale or low confidence; regenerating"
        );

        match self.generate(params).await {
            Ok(content) => {
                let metadata = FreshnessPolicy::new_metadata(params, FRESH_CONFIDENCE);
                let doc = StoredDocument::new(content, metadata);
                if let Err(e) = self.persist(&key, &doc).await {
                    self.stats.record(Outcome::Failed);
                    tracing::error!(key = %key, error = %e, "failed to save generated content");
                    return Err(e);
                }
                self.stats.record(Outcome::Regenerated);
                tracing::info!(key = %key, "generated and saved new content");
                Ok(ServiceResponse::fresh(doc.content))
            }
            Err(e) if e.is_generation_failure() => match cached {
                Some(doc) => {
                    self.stats.record(Outcome::StaleFallback);
                    tracing::warn!(key = %key, error = %e, "generation failed, serving stale content");
                    Ok(ServiceResponse::stale(doc.content))
                }
                None => {
                    self.stats.record(Outcome::Failed);
                    tracing::error!(key = %key, error = %e, "generation failed with no cached content");
                    Err(e)
                }
            },
            Err(e) => {
                self.stats.record(Outcome::Failed);
                tracing::error!(key = %key, error = %e, "content request failed");
                Err(e)
            }
        }
    }

    /// Direct read of whatever is stored for `topic_id`, fresh or not. An
    /// entry that no longer decodes reads as absent.
    pub async fn get_by_id(&self, topic_id: &str) -> Result<Option<P::Payload>> {
        let key = StoreKey::new(self.kind(), topic_id);
        match self.load(&key).await {
            Ok(doc) => Ok(doc.map(|doc| doc.content)),
            Err(Error::Store(e @ StoreError::Corrupt { .. })) => {
                tracing::warn!(key = %key, error = %e, "stored content is unreadable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn load(&self, key: &StoreKey) -> Result<Option<StoredDocument<P::Payload>>> {
        let Some(doc) = self.store.get(key).await? else {
            return Ok(None);
        };
        let typed = doc.decode().map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(typed))
    }

    async fn generate(&self, params: &ServiceParams) -> Result<P::Payload> {
        let prompt = self
            .kind()
            .render_prompt(&params.title, &params.description, &params.level);
        tracing::debug!(
            kind = %self.kind(),
            generator = self.generator.name(),
            prompt = %prompt,
            "rendered prompt"
        );

        let raw = self.generator.generate(&prompt).await?;
        self.parser.parse(&raw)
    }

    async fn persist(&self, key: &StoreKey, doc: &StoredDocument<P::Payload>) -> Result<()> {
        let untyped = doc.to_untyped()?;
        self.store.put(key, &untyped).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FreshnessConfig;
    use crate::processors::QuizParser;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct Scripted(std::result::Result<&'static str, ()>);

    #[async_trait]
    impl ContentGenerator for Scripted {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(Error::generation("offline", "scripted")),
            }
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    const QUIZ: &str = r#"[{"question": "Q", "options": ["a","b","c","d"], "answer": "a"}]"#;

    fn service(store: MemoryStore, generator: Scripted) -> ContentService<QuizParser> {
        ContentService::new(
            QuizParser,
            Arc::new(store),
            Arc::new(generator),
            FreshnessPolicy::new(FreshnessConfig::default()),
        )
    }

    #[tokio::test]
    async fn miss_generates_and_stores() {
        let store = MemoryStore::new();
        let svc = service(store.clone(), Scripted(Ok(QUIZ)));
        let resp = svc
            .get_or_create(&ServiceParams::new("T", "D", "B1", "X"))
            .await
            .unwrap();
        assert!(!resp.is_stale());
        assert_eq!(resp.content[0].question, "Q");
        assert_eq!(store.len(), 1);
        assert_eq!(svc.stats().regenerations, 1);
        assert_eq!(svc.get_by_id("X").await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_cached_document_is_regenerated() {
        let store = MemoryStore::new();
        let params = ServiceParams::new("T", "D", "B1", "X");
        store
            .put(
                &StoreKey::new(ContentKind::Quiz, "X"),
                &StoredDocument::new(
                    serde_json::json!({"not": "a quiz"}),
                    FreshnessPolicy::new_metadata(&params, 1.0),
                ),
            )
            .await
            .unwrap();

        let svc = service(store.clone(), Scripted(Ok(QUIZ)));
        let resp = svc.get_or_create(&params).await.unwrap();
        assert!(!resp.is_stale());
        assert_eq!(resp.content[0].question, "Q");
        assert_eq!(svc.stats().regenerations, 1);
        assert_eq!(svc.get_by_id("X").await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_document_reads_as_absent() {
        let store = MemoryStore::new();
        let params = ServiceParams::new("T", "D", "B1", "X");
        store
            .put(
                &StoreKey::new(ContentKind::Quiz, "X"),
                &StoredDocument::new(
                    serde_json::json!([{"question": "Q"}]),
                    FreshnessPolicy::new_metadata(&params, 1.0),
                ),
            )
            .await
            .unwrap();

        let svc = service(store, Scripted(Err(())));
        assert!(svc.get_by_id("X").await.unwrap().is_none());

        // nothing usable to fall back on
        let err = svc.get_or_create(&params).await.unwrap_err();
        assert!(matches!(err, Error::Generation { .. }));
    }

    #[tokio::test]
    async fn failure_without_cache_propagates() {
        let svc = service(MemoryStore::new(), Scripted(Err(())));
        let err = svc
            .get_or_create(&ServiceParams::new("T", "D", "B1", "X"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to generate content"));
        assert!(svc.get_by_id("X").await.unwrap().is_none());
    }
}
