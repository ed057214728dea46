//! Learning-content HTTP server.
//!
//! Loads configuration, wires the store and generator into one service per
//! content kind, and serves the axum router until Ctrl-C.

use ai_learn_content::api::{create_router, AppState};
use ai_learn_content::cache::FreshnessPolicy;
use ai_learn_content::config::{AppConfig, StoreBackend};
use ai_learn_content::generator::{ContentGenerator, GeminiGenerator};
use ai_learn_content::processors::{ExerciseParser, QuizParser, StudyParser};
use ai_learn_content::service::ContentService;
use ai_learn_content::store::{ContentStore, FirestoreStore, MemoryStore};
use ai_learn_content::telemetry::{init_tracing, LogFormat};
use anyhow::Context;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::from_env())?;

    let config = AppConfig::load().context("loading configuration")?;

    let store: Arc<dyn ContentStore> = match config.store.backend {
        StoreBackend::Firestore => Arc::new(FirestoreStore::new(config.firestore_config()?)?),
        StoreBackend::Memory => {
            tracing::warn!("using in-memory content store; content is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let generator = GeminiGenerator::new(config.gemini_config()?)?;
    tracing::info!(
        store = store.name(),
        model = generator.model(),
        cache_duration_hours = config.freshness.cache_duration_hours,
        min_confidence_for_regen = config.freshness.min_confidence_for_regen,
        "content services configured"
    );
    let generator: Arc<dyn ContentGenerator> = Arc::new(generator);

    let policy = FreshnessPolicy::new(config.freshness);
    let state = AppState::new(
        ContentService::new(QuizParser, store.clone(), generator.clone(), policy),
        ContentService::new(ExerciseParser, store.clone(), generator.clone(), policy),
        ContentService::new(StudyParser, store, generator, policy),
    );
    let app = create_router(state, &config.server);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "learning content server listening");

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.context("server error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }
    Ok(())
}
