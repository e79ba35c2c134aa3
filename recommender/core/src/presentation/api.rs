// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP API (Axum)
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /` | Search page |
//! | `GET /recommend?course=<name>[&count=<k>]` | Top-K similar courses |
//! | `GET /api/courses` | Every course name in the model |
//! | `GET /health` | Model status and uptime |
//!
//! Errors are returned as `{"error": "..."}` with a matching status code.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::application::recommender::{Recommender, RecommenderStatus};
use crate::domain::recommendation::{Recommendation, RecommendationError};
use crate::domain::service_config::RecommendationLimits;
use crate::infrastructure::home_page::{HomePage, HomePageContext};

pub struct AppState {
    pub recommender: Recommender,
    pub home_page: HomePage,
    pub service_name: String,
    pub limits: RecommendationLimits,
    pub started_at: DateTime<Utc>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        recommender: Recommender,
        home_page: HomePage,
        service_name: impl Into<String>,
        limits: RecommendationLimits,
    ) -> Self {
        Self {
            recommender,
            home_page,
            service_name: service_name.into(),
            limits,
            started_at: Utc::now(),
            start_time: Instant::now(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/recommend", get(recommend))
        .route("/api/courses", get(list_courses))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    fn unavailable() -> Self {
        Self::Internal("Recommendation service is not available".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<RecommendationError> for ApiError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::NotFound(_) => Self::NotFound("Course not found".to_string()),
            RecommendationError::Unavailable(_) => Self::unavailable(),
            RecommendationError::Unexpected(reason) => {
                error!("Error getting recommendations: {}", reason);
                Self::Internal("An error occurred while processing your request".to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub course: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CourseList {
    pub courses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: RecommenderStatus,
    pub course_count: usize,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    let context = HomePageContext {
        service_name: state.service_name.clone(),
        available: state.recommender.is_ready(),
        course_count: state.recommender.course_count(),
        default_count: state.limits.default_count,
    };

    match state.home_page.render(&context) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Error rendering home page: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Internal server error</h1>".to_string()),
            )
                .into_response()
        }
    }
}

async fn recommend(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecommendQuery>, QueryRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    if !state.recommender.is_ready() {
        record_outcome("unavailable");
        return Err(ApiError::unavailable());
    }

    let Query(query) = query?;

    let course = query
        .course
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Course name is required".to_string()))?;

    let count = parse_count(query.count.as_deref(), &state.limits)?;

    let result = state.recommender.get_recommendations(course, count);
    record_outcome(match &result {
        Ok(_) => "ok",
        Err(RecommendationError::NotFound(_)) => "not_found",
        Err(RecommendationError::Unavailable(_)) => "unavailable",
        Err(RecommendationError::Unexpected(_)) => "error",
    });

    Ok(Json(result?))
}

async fn list_courses(State(state): State<Arc<AppState>>) -> Result<Json<CourseList>, ApiError> {
    metrics::counter!("coursewise_course_list_requests_total").increment(1);

    let courses = state.recommender.list_courses()?;
    Ok(Json(CourseList { courses }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: state.recommender.status(),
        course_count: state.recommender.course_count(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        started_at: state.started_at,
    })
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("coursewise_recommendation_requests_total", "outcome" => outcome).increment(1);
}

/// Requested count, or the configured default. Counts above `max_count` are rejected.
fn parse_count(raw: Option<&str>, limits: &RecommendationLimits) -> Result<usize, ApiError> {
    let Some(raw) = raw else {
        return Ok(limits.default_count);
    };

    let count: usize = raw.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!("Invalid count '{}': expected a non-negative integer", raw))
    })?;

    if count > limits.max_count {
        return Err(ApiError::BadRequest(format!(
            "count must not exceed {}",
            limits.max_count
        )));
    }

    Ok(count)
}
