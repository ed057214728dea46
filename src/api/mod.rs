//! HTTP 接口模块：axum 路由、错误响应与中间件。
//!
//! # HTTP API
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/health` | `OK` |
//! | GET | `/health/stats` | orchestrator counters per kind |
//! | POST | `/api/learn/{quiz,exercise,study}` | `{success, <kind>, warning?}` |
//! | GET | `/api/learn/{quiz,exercise,study}/:topic_id` | `{success, <kind>}` or 404 |
//!
//! Errors use the envelope `{success: false, error}` (see [`ApiError`]).

mod error;
mod health;
mod routes;

pub use error::{ApiError, ErrorCode};
pub use routes::{content_routes, ContentRequest, REQUIRED_FIELDS_MESSAGE};

use crate::config::ServerConfig;
use crate::service::{ExerciseService, QuizService, StudyService};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// The three orchestrators, shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub quiz: Arc<QuizService>,
    pub exercise: Arc<ExerciseService>,
    pub study: Arc<StudyService>,
}

impl AppState {
    pub fn new(quiz: QuizService, exercise: ExerciseService, study: StudyService) -> Self {
        Self {
            quiz: Arc::new(quiz),
            exercise: Arc::new(exercise),
            study: Arc::new(study),
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Build the full application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let health_routes = Router::new()
        .route("/", get(health::health))
        .route("/stats", get(health::stats))
        .with_state(state.clone());

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ));

    Router::new()
        .nest("/health", health_routes)
        .nest("/api/learn/quiz", content_routes(state.quiz))
        .nest("/api/learn/exercise", content_routes(state.exercise))
        .nest("/api/learn/study", content_routes(state.study))
        .fallback(not_found)
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}

/// Any origin when none are configured, otherwise only the listed ones.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        return cors.allow_origin(Any);
    }

    tracing::info!(origins = ?config.cors_origins, "CORS: restricting origins");
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}
