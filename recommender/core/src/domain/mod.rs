// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Layer
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`catalog`] | `SimilarityMatrix`, `CourseIndex`, `CourseTitles`, `ModelArtifact` |
//! | [`recommendation`] | Ranking algorithm, `Recommendation`, `RecommendationError` |
//! | [`model_store`] | `ModelStore` contract and `LoadError` |
//! | [`service_config`] | YAML service configuration manifest |

pub mod catalog;
pub mod model_store;
pub mod recommendation;
pub mod service_config;

pub use catalog::*;
pub use model_store::*;
pub use recommendation::*;
