// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use coursewise_core::domain::service_config::{ServiceConfigManifest, CONFIG_PATH_ENV};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./coursewise-config.yaml)
        #[arg(short, long, default_value = "./coursewise-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate { output, examples } => generate(output, examples),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = ServiceConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        match &config_override {
            Some(path) => println!("  1. --config flag: {}", path.display()),
            None => println!("  1. --config flag: {}", "(not set)".dimmed()),
        }
        // COURSEWISE_CONFIG_PATH, when set, is the first candidate
        if std::env::var(CONFIG_PATH_ENV).is_err() {
            println!("     {}: {}", CONFIG_PATH_ENV, "(not set)".dimmed());
        }
        for (i, path) in ServiceConfigManifest::candidate_paths().iter().enumerate() {
            let marker = if path.exists() {
                "found".green()
            } else {
                "missing".dimmed()
            };
            println!("  {}. {} ({})", i + 2, path.display(), marker);
        }
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Service:".bold());
    println!("  Name: {}", config.metadata.name);
    if let Some(version) = &config.metadata.version {
        println!("  Version: {}", version);
    }
    println!();

    println!("{}", "Model:".bold());
    println!("  Path: {}", config.spec.model.path.display());
    match config.spec.model.format {
        Some(format) => println!("  Format: {}", format),
        None => println!("  Format: {}", "(from file extension)".dimmed()),
    }
    println!();

    println!("{}", "Server:".bold());
    println!(
        "  Listen: {}:{}",
        config.spec.server.bind_address, config.spec.server.port
    );
    println!();

    println!("{}", "Recommendations:".bold());
    println!("  Default count: {}", config.spec.recommendations.default_count);
    println!("  Max count: {}", config.spec.recommendations.max_count);
    println!();

    println!("{}", "Observability:".bold());
    match config.logging() {
        Some(logging) => println!("  Logging: {} ({})", logging.level, logging.format),
        None => println!("  Logging: {}", "(defaults)".dimmed()),
    }
    match config.metrics() {
        Some(metrics) => println!("  Metrics: enabled on port {}", metrics.port),
        None => println!("  Metrics: {}", "disabled".dimmed()),
    }
    println!();

    Ok(())
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ServiceConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

fn generate(output: PathBuf, with_examples: bool) -> Result<()> {
    std::fs::write(&output, sample_config(with_examples))
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

fn sample_config(with_examples: bool) -> &'static str {
    if with_examples {
        include_str!("../../templates/config-with-examples.yaml")
    } else {
        include_str!("../../templates/config-minimal.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_samples_validate() {
        for with_examples in [false, true] {
            let config = ServiceConfigManifest::from_yaml_str(sample_config(with_examples)).unwrap();
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("coursewise-config.yaml");

        generate(output.clone(), false).unwrap();

        let config = ServiceConfigManifest::from_yaml_file(&output).unwrap();
        assert_eq!(config.metadata.name, "coursewise");
    }
}
