// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the coursewise CLI

pub mod config;
pub mod courses;
pub mod model;
pub mod recommend;
pub mod status;

pub use self::config::ConfigCommand;
pub use self::model::ModelCommand;
