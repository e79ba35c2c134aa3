// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Infrastructure layer: artifact persistence and page rendering

pub mod artifact_store;
pub mod home_page;

pub use artifact_store::ArtifactStore;
pub use home_page::{HomePage, HomePageContext};
