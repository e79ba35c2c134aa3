// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Embedded mode lookups (no server involved)
//!
//! Loads the configured artifact in-process and answers queries directly.
//! Unlike `serve`, a load failure is an error here rather than a degraded state.

use anyhow::{Context, Result};
use tracing::debug;

use coursewise_core::{
    application::{RecommendationService, StandardRecommendationService},
    domain::{service_config::ServiceConfigManifest, Recommendation},
    infrastructure::ArtifactStore,
};

pub struct EmbeddedRecommender {
    service: StandardRecommendationService,
}

impl EmbeddedRecommender {
    pub fn from_config(config: &ServiceConfigManifest) -> Result<Self> {
        let store = ArtifactStore::from_config(&config.spec.model);
        let service = StandardRecommendationService::from_store(&store)
            .with_context(|| format!("Failed to load model from {}", store.path().display()))?;

        debug!(
            "Embedded recommender ready with {} courses",
            service.course_count()
        );

        Ok(Self { service })
    }

    pub fn recommend(&self, course_name: &str, count: usize) -> Result<Recommendation> {
        self.service
            .get_recommendations(course_name, count)
            .map_err(anyhow::Error::from)
    }

    pub fn courses(&self) -> Vec<String> {
        self.service.list_courses()
    }
}
