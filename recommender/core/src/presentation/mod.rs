// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer
//!
//! HTTP surface that translates requests into [`crate::application::Recommender`]
//! calls and lookup errors into status codes. No ranking logic lives here.

pub mod api;
