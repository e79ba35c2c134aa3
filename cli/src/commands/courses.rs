// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `coursewise courses` - list the catalog of the configured artifact

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use coursewise_core::domain::service_config::ServiceConfigManifest;

use crate::embedded::EmbeddedRecommender;

#[derive(Args)]
pub struct CoursesArgs {
    /// Print the JSON body the HTTP API would return
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: CoursesArgs, config: &ServiceConfigManifest) -> Result<()> {
    let courses = EmbeddedRecommender::from_config(config)?.courses();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json!({ "courses": courses }))?);
        return Ok(());
    }

    println!("{}", format!("{} courses", courses.len()).bold());
    for course in &courses {
        println!("  {}", course);
    }

    Ok(())
}
