//! HTTP boundary through `tower::ServiceExt::oneshot`.

mod common;

use ai_learn_content::api::{create_router, AppState, REQUIRED_FIELDS_MESSAGE};
use ai_learn_content::config::ServerConfig;
use ai_learn_content::processors::{ExerciseParser, QuizParser, StudyParser};
use ai_learn_content::types::ContentKind;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use common::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct Harness {
    app: Router,
    store: Arc<CountingStore>,
    generator: Arc<ScriptedGenerator>,
}

fn harness(reply: Option<&str>) -> Harness {
    let store = CountingStore::new();
    let generator = match reply {
        Some(text) => ScriptedGenerator::replying(text),
        None => ScriptedGenerator::failing(),
    };
    let state = AppState::new(
        service(QuizParser, &store, &generator),
        service(ExerciseParser, &store, &generator),
        service(StudyParser, &store, &generator),
    );
    Harness {
        app: create_router(state, &ServerConfig::default()),
        store,
        generator,
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_returns_ok_with_security_headers() {
    let h = harness(None);
    let resp = h.app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
    assert_eq!(resp.headers()["referrer-policy"], "no-referrer");

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn post_generates_quiz() {
    let h = harness(Some(ONE_QUESTION_QUIZ));
    let (status, body) = send(
        &h.app,
        post(
            "/api/learn/quiz",
            json!({"title": "T", "description": "D", "level": "A2", "id": "X"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["quiz"][0]["question"], "Q1");
    assert!(body.get("warning").is_none());

    let doc = h.store.stored(ContentKind::Quiz, "X").await.unwrap();
    assert_eq!(doc.metadata.level, "A2");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let h = harness(Some(ONE_QUESTION_QUIZ));
    for body in [
        json!({"description": "D", "id": "X"}),
        json!({"title": "T", "id": "X"}),
        json!({"title": "T", "description": "D"}),
        json!({"title": "", "description": "D", "id": "X"}),
    ] {
        let (status, resp) = send(&h.app, post("/api/learn/exercise", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["success"], false);
        assert_eq!(resp["error"], REQUIRED_FIELDS_MESSAGE);
    }
    assert_eq!(h.generator.calls(), 0);
    assert_eq!(h.store.gets(), 0);
}

#[tokio::test]
async fn malformed_json_and_bad_confidence_are_bad_requests() {
    let h = harness(Some(ONE_QUESTION_QUIZ));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/learn/quiz")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &h.app,
        post(
            "/api/learn/quiz",
            json!({"title": "T", "description": "D", "id": "X", "confidence": 3}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("confidence"));
}

#[tokio::test]
async fn stale_fallback_carries_warning() {
    let h = harness(None);
    h.store
        .seed(ContentKind::Study, "X", serde_json::from_str(STUDY).unwrap(), Duration::hours(72), 1.0)
        .await;

    let (status, body) = send(
        &h.app,
        post("/api/learn/study", json!({"title": "T", "description": "D", "id": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["study"]["summary"], "S");
    assert_eq!(body["warning"], "AI API call failed, served stale data.");
}

#[tokio::test]
async fn generation_failure_without_cache_is_500() {
    let h = harness(None);
    let (status, body) = send(
        &h.app,
        post("/api/learn/quiz", json!({"title": "T", "description": "D", "id": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to generate content from AI service.");
}

#[tokio::test]
async fn store_failure_is_500() {
    let h = harness(Some(ONE_QUESTION_QUIZ));
    h.store.fail_reads();
    let (status, body) = send(
        &h.app,
        post("/api/learn/quiz", json!({"title": "T", "description": "D", "id": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(h.generator.calls(), 0);
}

#[tokio::test]
async fn get_by_id_returns_stored_content_or_404() {
    let h = harness(Some(EXERCISES));

    let (status, body) = send(&h.app, get("/api/learn/exercise/X")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Exercise not found"}));

    let (status, _) = send(
        &h.app,
        post("/api/learn/exercise", json!({"title": "T", "description": "D", "id": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&h.app, get("/api/learn/exercise/X")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exercise"][0]["solution"], "bin");

    let (_, body) = send(&h.app, get("/api/learn/quiz/X")).await;
    assert_eq!(body["error"], "Quiz not found");
    let (_, body) = send(&h.app, get("/api/learn/study/X")).await;
    assert_eq!(body["error"], "Study material not found");
}

#[tokio::test]
async fn stats_reflect_outcomes() {
    let h = harness(Some(ONE_QUESTION_QUIZ));
    let request = json!({"title": "T", "description": "D", "id": "X"});
    send(&h.app, post("/api/learn/quiz", request.clone())).await;
    send(&h.app, post("/api/learn/quiz", request)).await;

    let (status, body) = send(&h.app, get("/health/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quiz"]["regenerations"], 1);
    assert_eq!(body["quiz"]["fresh_hits"], 1);
    assert_eq!(body["quiz"]["hit_ratio"], 0.5);
    assert_eq!(body["study"]["misses"], 0);
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let h = harness(None);
    let (status, body) = send(&h.app, get("/api/learn/poem/X")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
