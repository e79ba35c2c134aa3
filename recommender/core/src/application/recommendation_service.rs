// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # RecommendationService
//!
//! Answers the two lookup queries against an in-memory [`ModelArtifact`]:
//!
//! - `get_recommendations`: resolve the course name to its matrix row, rank
//!   the row (see `crate::domain::recommendation`), and map the retained
//!   columns to display titles
//! - `list_courses`: every course name known to the index
//!
//! The artifact is shared behind an `Arc` and never mutated, so any number of
//! request handlers may call in concurrently without locking.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::catalog::ModelArtifact;
use crate::domain::model_store::{LoadError, ModelStore};
use crate::domain::recommendation::{nearest_neighbours, Recommendation, RecommendationError};

pub trait RecommendationService: Send + Sync {
    /// Up to `count` courses most similar to `course_name`.
    fn get_recommendations(
        &self,
        course_name: &str,
        count: usize,
    ) -> Result<Recommendation, RecommendationError>;

    /// All course names, in matrix order.
    fn list_courses(&self) -> Vec<String>;

    fn course_count(&self) -> usize;
}

/// Standard implementation of RecommendationService
pub struct StandardRecommendationService {
    artifact: Arc<ModelArtifact>,
}

impl StandardRecommendationService {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self {
            artifact: Arc::new(artifact),
        }
    }

    pub fn from_store(store: &dyn ModelStore) -> Result<Self, LoadError> {
        store.load().map(Self::new)
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}

impl RecommendationService for StandardRecommendationService {
    fn get_recommendations(
        &self,
        course_name: &str,
        count: usize,
    ) -> Result<Recommendation, RecommendationError> {
        let Some(position) = self.artifact.index().position(course_name) else {
            warn!("Course not found: {}", course_name);
            return Err(RecommendationError::NotFound(course_name.to_string()));
        };

        let row = self.artifact.similarity().row(position).ok_or_else(|| {
            RecommendationError::Unexpected(format!(
                "no similarity row at index {} for '{}'",
                position, course_name
            ))
        })?;

        let titles = self.artifact.titles();
        let recommendations = nearest_neighbours(row, count)
            .into_iter()
            .map(|column| {
                titles.get(column).map(str::to_string).ok_or_else(|| {
                    RecommendationError::Unexpected(format!("no course title at index {}", column))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Recommendations for '{}': {:?}", course_name, recommendations);

        Ok(Recommendation {
            input_course: course_name.to_string(),
            recommendations,
        })
    }

    fn list_courses(&self) -> Vec<String> {
        self.artifact.index().names().to_vec()
    }

    fn course_count(&self) -> usize {
        self.artifact.course_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn service() -> StandardRecommendationService {
        let names = ["A", "B", "C", "D"];
        let artifact = ModelArtifact::from_parts(
            vec![
                vec![1.0, 0.9, 0.5, 0.9],
                vec![0.9, 1.0, 0.3, 0.4],
                vec![0.5, 0.3, 1.0, 0.2],
                vec![0.9, 0.4, 0.2, 1.0],
            ],
            names.iter().enumerate().map(|(i, n)| (n.to_string(), i)).collect::<HashMap<_, _>>(),
            names.iter().map(|n| n.to_string()).collect(),
        )
        .unwrap();
        StandardRecommendationService::new(artifact)
    }

    #[test]
    fn test_recommendations_with_tie() {
        let result = service().get_recommendations("A", 2).unwrap();
        assert_eq!(result.input_course, "A");
        assert_eq!(result.recommendations, vec!["B", "D"]);
    }

    #[test]
    fn test_unknown_course() {
        let err = service().get_recommendations("Nonexistent Course", 3).unwrap_err();
        assert_eq!(err, RecommendationError::NotFound("Nonexistent Course".to_string()));
    }

    #[test]
    fn test_count_exceeding_catalog() {
        let result = service().get_recommendations("C", 10).unwrap();
        assert_eq!(result.recommendations, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_list_courses() {
        let courses: HashSet<String> = service().list_courses().into_iter().collect();
        let expected: HashSet<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        assert_eq!(courses, expected);
    }

    #[test]
    fn test_titles_differ_from_index_keys() {
        let artifact = ModelArtifact::from_parts(
            vec![vec![1.0, 0.7], vec![0.7, 1.0]],
            HashMap::from([("rust-101".to_string(), 0), ("go-101".to_string(), 1)]),
            vec!["Intro to Rust".to_string(), "Intro to Go".to_string()],
        )
        .unwrap();
        let service = StandardRecommendationService::new(artifact);

        let result = service.get_recommendations("rust-101", 3).unwrap();
        assert_eq!(result.input_course, "rust-101");
        assert_eq!(result.recommendations, vec!["Intro to Go"]);
    }
}
