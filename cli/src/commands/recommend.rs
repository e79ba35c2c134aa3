// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `coursewise recommend` - offline lookup against the configured artifact

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use coursewise_core::domain::{service_config::ServiceConfigManifest, Recommendation};

use crate::embedded::EmbeddedRecommender;

#[derive(Args)]
pub struct RecommendArgs {
    /// Course name, exactly as it appears in the catalog
    #[arg(value_name = "COURSE")]
    pub course: String,

    /// Number of recommendations (default: spec.recommendations.default_count)
    #[arg(short = 'k', long)]
    pub count: Option<usize>,

    /// Print the JSON body the HTTP API would return
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: RecommendArgs, config: &ServiceConfigManifest) -> Result<()> {
    let count = resolve_count(args.count, config)?;
    let recommender = EmbeddedRecommender::from_config(config)?;
    let recommendation = recommender.recommend(&args.course, count)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print_recommendation(&recommendation);
    }

    Ok(())
}

fn resolve_count(requested: Option<usize>, config: &ServiceConfigManifest) -> Result<usize> {
    let limits = config.spec.recommendations;
    let count = requested.unwrap_or(limits.default_count);
    if count > limits.max_count {
        anyhow::bail!("count must not exceed {}", limits.max_count);
    }
    Ok(count)
}

fn print_recommendation(recommendation: &Recommendation) {
    println!(
        "{} {}",
        "Courses similar to".bold(),
        recommendation.input_course.cyan()
    );

    if recommendation.recommendations.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }

    for (rank, course) in recommendation.recommendations.iter().enumerate() {
        println!("  {}. {}", rank + 1, course);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_defaults_from_config() {
        let config = ServiceConfigManifest::default();
        assert_eq!(
            resolve_count(None, &config).unwrap(),
            config.spec.recommendations.default_count
        );
    }

    #[test]
    fn test_count_above_limit_is_rejected() {
        let config = ServiceConfigManifest::default();
        let max = config.spec.recommendations.max_count;
        assert_eq!(resolve_count(Some(max), &config).unwrap(), max);
        assert!(resolve_count(Some(max + 1), &config).is_err());
    }
}
