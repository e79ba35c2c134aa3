// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Top-K Recommendation
//!
//! Ranking over a single precomputed similarity row. Columns are ordered by
//! descending score with ties going to the lower column index, so repeated
//! queries always produce the same list.
//!
//! The entry at ranked position 0 is dropped unconditionally. It is assumed
//! to be the queried course (a course is maximally similar to itself) but
//! this is not checked: if the artifact gives another course a higher score
//! than the self-match, that course is the one dropped.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

pub const DEFAULT_RECOMMENDATION_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub input_course: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationError {
    #[error("Course not found: {0}")]
    NotFound(String),
    #[error("Recommendation service is not available: {0}")]
    Unavailable(String),
    #[error("Unexpected recommendation failure: {0}")]
    Unexpected(String),
}

/// Pair every column with its score and sort best first.
///
/// Scores are compared numerically, so `-0.0` and `0.0` tie. Rows are
/// finite (checked at load).
pub fn rank_row(row: &[f64]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}

/// Column positions of the `count` best-ranked entries after position 0.
pub fn nearest_neighbours(row: &[f64], count: usize) -> Vec<usize> {
    rank_row(row)
        .into_iter()
        .skip(1)
        .take(count)
        .map(|(column, _)| column)
        .collect()
}
