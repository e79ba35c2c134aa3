// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # coursewise-core
//!
//! Course recommendation lookup over a precomputed item-similarity matrix.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Load the offline-built model artifact once and answer
//!   top-K nearest-course queries against it

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
