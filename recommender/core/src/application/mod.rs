// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Application Layer
//!
//! - [`recommendation_service`]: lookup operations over a loaded artifact
//! - [`recommender`]: the Ready/Unavailable handle injected into the HTTP layer

pub mod recommendation_service;
pub mod recommender;

pub use recommendation_service::{RecommendationService, StandardRecommendationService};
pub use recommender::{Recommender, RecommenderStatus};
