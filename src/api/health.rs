use super::AppState;
use crate::cache::ContentStats;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

fn stats_json(stats: ContentStats) -> Value {
    json!({
        "fresh_hits": stats.fresh_hits,
        "misses": stats.misses,
        "regenerations": stats.regenerations,
        "stale_fallbacks": stats.stale_fallbacks,
        "failures": stats.failures,
        "hit_ratio": stats.hit_ratio(),
    })
}

/// Orchestrator counters per content kind since process start.
pub async fn stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "quiz": stats_json(state.quiz.stats()),
        "exercise": stats_json(state.exercise.stats()),
        "study": stats_json(state.study.stats()),
    }))
}
