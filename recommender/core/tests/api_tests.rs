// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use coursewise_core::application::{Recommender, StandardRecommendationService};
use coursewise_core::domain::service_config::RecommendationLimits;
use coursewise_core::domain::ModelArtifact;
use coursewise_core::infrastructure::HomePage;
use coursewise_core::presentation::api::{app, AppState};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

fn four_courses() -> ModelArtifact {
    let names = ["Intro to Rust", "Async Rust", "Go Basics", "Systems Design"];
    ModelArtifact::from_parts(
        vec![
            vec![1.0, 0.9, 0.5, 0.9],
            vec![0.9, 1.0, 0.3, 0.4],
            vec![0.5, 0.3, 1.0, 0.2],
            vec![0.9, 0.4, 0.2, 1.0],
        ],
        names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), i))
            .collect::<HashMap<_, _>>(),
        names.iter().map(|n| n.to_string()).collect(),
    )
    .unwrap()
}

fn router(recommender: Recommender) -> Router {
    let limits = RecommendationLimits {
        default_count: 2,
        max_count: 5,
    };
    app(AppState::new(recommender, HomePage::new().unwrap(), "coursewise", limits))
}

fn ready_router() -> Router {
    router(Recommender::ready(Arc::new(StandardRecommendationService::new(
        four_courses(),
    ))))
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_recommend_uses_default_count() {
    let (status, body) = get_json(ready_router(), "/recommend?course=Intro%20to%20Rust").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_course"], "Intro to Rust");
    assert_eq!(
        body["recommendations"],
        serde_json::json!(["Async Rust", "Systems Design"])
    );
}

#[tokio::test]
async fn test_recommend_with_count() {
    let (status, body) = get_json(ready_router(), "/recommend?course=Go%20Basics&count=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["recommendations"],
        serde_json::json!(["Intro to Rust", "Async Rust", "Systems Design"])
    );
}

#[tokio::test]
async fn test_recommend_requires_course() {
    for uri in ["/recommend", "/recommend?course=", "/recommend?course=%20%20"] {
        let (status, body) = get_json(ready_router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Course name is required");
    }
}

#[tokio::test]
async fn test_recommend_malformed_query_is_json_error() {
    let (status, body) = get(ready_router(), "/recommend?course=A&course=B").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("duplicate field"));
}

#[tokio::test]
async fn test_recommend_rejects_count_above_limit() {
    let (status, body) = get_json(ready_router(), "/recommend?course=Go%20Basics&count=6").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "count must not exceed 5");
}

#[tokio::test]
async fn test_recommend_unknown_course() {
    let (status, body) = get_json(ready_router(), "/recommend?course=Nonexistent%20Course").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}

#[tokio::test]
async fn test_list_courses() {
    let (status, body) = get_json(ready_router(), "/api/courses").await;

    assert_eq!(status, StatusCode::OK);
    let mut courses: Vec<String> = serde_json::from_value(body["courses"].clone()).unwrap();
    courses.sort();
    assert_eq!(
        courses,
        vec!["Async Rust", "Go Basics", "Intro to Rust", "Systems Design"]
    );
}

#[tokio::test]
async fn test_unavailable_service() {
    let unavailable = || router(Recommender::unavailable("Model artifact not found: model.json"));

    let (status, body) = get_json(unavailable(), "/recommend?course=Go%20Basics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Recommendation service is not available");

    // unavailability is reported before request validation
    let (status, _) = get_json(unavailable(), "/recommend").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = get_json(unavailable(), "/api/courses").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Recommendation service is not available");

    let (status, body) = get_json(unavailable(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["course_count"], 0);
}

#[tokio::test]
async fn test_health_ready() {
    let (status, body) = get_json(ready_router(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["course_count"], 4);
    assert!(body["started_at"].is_string());
}

#[tokio::test]
async fn test_home_page() {
    let (status, body) = get(ready_router(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("4 courses in the catalog."));
    assert!(body.contains("/recommend?count=2&course="));
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get_json(ready_router(), "/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}
