// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Model artifact tooling
//!
//! Commands: inspect, convert

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use coursewise_core::domain::{
    rank_row, service_config::ServiceConfigManifest, ModelArtifact, ModelStore,
};
use coursewise_core::infrastructure::ArtifactStore;

/// Differences below this are treated as symmetric.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

#[derive(Subcommand)]
pub enum ModelCommand {
    /// Load an artifact and report its shape and anomalies
    Inspect {
        /// Artifact path (default: spec.model.path)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Re-encode an artifact; formats follow the file extensions
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

pub fn handle_command(command: ModelCommand, config: &ServiceConfigManifest) -> Result<()> {
    match command {
        ModelCommand::Inspect { file } => {
            let store = match file {
                Some(path) => ArtifactStore::new(path),
                None => ArtifactStore::from_config(&config.spec.model),
            };
            inspect(&store)
        }
        ModelCommand::Convert { input, output } => convert(input, output),
    }
}

/// Findings from a loaded artifact that validation does not reject.
#[derive(Debug, Default, PartialEq)]
pub struct ArtifactReport {
    pub course_count: usize,
    /// Largest `|s[i][j] - s[j][i]|` in the matrix.
    pub max_asymmetry: f64,
    /// Courses whose own column is not ranked first in their row.
    pub self_match_not_first: Vec<String>,
    /// Positions where the title differs from the indexed name.
    pub title_mismatches: Vec<usize>,
}

impl ArtifactReport {
    pub fn from_artifact(artifact: &ModelArtifact) -> Self {
        let rows = artifact.similarity().rows();
        let names = artifact.index().names();

        let mut max_asymmetry: f64 = 0.0;
        for (i, row) in rows.iter().enumerate() {
            for (j, score) in row.iter().enumerate().skip(i + 1) {
                max_asymmetry = max_asymmetry.max((score - rows[j][i]).abs());
            }
        }

        let self_match_not_first = rows
            .iter()
            .enumerate()
            .filter(|(i, row)| rank_row(row).first().map(|(column, _)| column) != Some(i))
            .map(|(i, _)| names[i].clone())
            .collect();

        let title_mismatches = names
            .iter()
            .enumerate()
            .filter(|(i, name)| artifact.titles().get(*i) != Some(name.as_str()))
            .map(|(i, _)| i)
            .collect();

        Self {
            course_count: artifact.course_count(),
            max_asymmetry,
            self_match_not_first,
            title_mismatches,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.max_asymmetry <= SYMMETRY_TOLERANCE
    }
}

fn inspect(store: &ArtifactStore) -> Result<()> {
    let format = store.format()?;
    let artifact = store
        .load()
        .with_context(|| format!("Failed to load model from {}", store.location()))?;
    let report = ArtifactReport::from_artifact(&artifact);

    println!("{}", "Model artifact:".bold());
    println!("  Path: {}", store.location());
    println!("  Format: {}", format);
    println!("  Courses: {}", report.course_count);

    if report.is_symmetric() {
        println!("  Symmetric: {}", "yes".green());
    } else {
        println!(
            "  Symmetric: {} (max difference {:.6})",
            "no".yellow(),
            report.max_asymmetry
        );
    }

    if report.self_match_not_first.is_empty() {
        println!("  Self-match ranked first: {}", "all courses".green());
    } else {
        println!(
            "  {}",
            format!(
                "Self-match not ranked first for {} course(s); their top-ranked neighbour is dropped from results:",
                report.self_match_not_first.len()
            )
            .yellow()
        );
        for name in &report.self_match_not_first {
            println!("    - {}", name);
        }
    }

    if !report.title_mismatches.is_empty() {
        println!(
            "  {}",
            format!(
                "{} title(s) differ from the indexed course name",
                report.title_mismatches.len()
            )
            .yellow()
        );
    }

    Ok(())
}

fn convert(input: PathBuf, output: PathBuf) -> Result<()> {
    let source = ArtifactStore::new(&input);
    let target = ArtifactStore::new(&output);
    // fail on an unsupported output extension before reading the input
    let target_format = target.format()?;

    let artifact = source
        .load()
        .with_context(|| format!("Failed to load model from {}", input.display()))?;
    target.save(&artifact)?;

    println!(
        "{}",
        format!(
            "✓ Converted {} courses to {} ({})",
            artifact.course_count(),
            output.display(),
            target_format
        )
        .green()
    );

    Ok(())
}
