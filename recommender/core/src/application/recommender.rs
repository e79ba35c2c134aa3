// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Recommender
//!
//! The lookup service as seen by request handlers. Constructed once at
//! startup from a [`ModelStore`]:
//!
//! - **Ready**: the artifact loaded; both operations are served for the life
//!   of the process
//! - **Unavailable**: the artifact failed to load; every operation fails fast
//!   with [`RecommendationError::Unavailable`]
//!
//! There is no reload, so a `Recommender` never changes state.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::application::recommendation_service::{
    RecommendationService, StandardRecommendationService,
};
use crate::domain::model_store::ModelStore;
use crate::domain::recommendation::{Recommendation, RecommendationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommenderStatus {
    Ready,
    Unavailable,
}

#[derive(Clone)]
pub enum Recommender {
    Ready(Arc<dyn RecommendationService>),
    Unavailable { reason: String },
}

impl Recommender {
    /// Load the artifact; a failure is logged and yields `Unavailable`.
    pub fn load(store: &dyn ModelStore) -> Self {
        match StandardRecommendationService::from_store(store) {
            Ok(service) => {
                let courses = service.course_count();
                info!("Recommendation model loaded from {} ({} courses)", store.location(), courses);
                metrics::gauge!("coursewise_model_courses").set(courses as f64);
                Self::Ready(Arc::new(service))
            }
            Err(e) => {
                error!("Error loading recommendation model from {}: {}", store.location(), e);
                metrics::gauge!("coursewise_model_courses").set(0.0);
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn ready(service: Arc<dyn RecommendationService>) -> Self {
        Self::Ready(service)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> RecommenderStatus {
        match self {
            Self::Ready(_) => RecommenderStatus::Ready,
            Self::Unavailable { .. } => RecommenderStatus::Unavailable,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    fn service(&self) -> Result<&dyn RecommendationService, RecommendationError> {
        match self {
            Self::Ready(service) => Ok(service.as_ref()),
            Self::Unavailable { reason } => Err(RecommendationError::Unavailable(reason.clone())),
        }
    }

    pub fn get_recommendations(
        &self,
        course_name: &str,
        count: usize,
    ) -> Result<Recommendation, RecommendationError> {
        self.service()?.get_recommendations(course_name, count)
    }

    pub fn list_courses(&self) -> Result<Vec<String>, RecommendationError> {
        Ok(self.service()?.list_courses())
    }

    /// Number of courses in the loaded model, 0 when unavailable.
    pub fn course_count(&self) -> usize {
        self.service().map(|s| s.course_count()).unwrap_or(0)
    }
}
