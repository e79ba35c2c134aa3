// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # coursewise CLI
//!
//! The `coursewise` binary serves course recommendations over HTTP and
//! answers the same lookups offline against the model artifact.
//!
//! ## Commands
//!
//! - `coursewise serve` - Run the HTTP server
//! - `coursewise recommend|courses` - Lookups against the configured artifact
//! - `coursewise model inspect|convert` - Artifact tooling
//! - `coursewise status` - Health check a running server
//! - `coursewise config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use coursewise::commands::{self, ConfigCommand, ModelCommand};
use coursewise::server;
use coursewise_core::domain::service_config::ServiceConfigManifest;

/// coursewise - Similar-course recommendations from a precomputed model
#[derive(Parser)]
#[command(name = "coursewise")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "COURSEWISE_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP host (overrides spec.server.bind_address)
    #[arg(long, global = true)]
    host: Option<String>,

    /// HTTP port (overrides spec.server.port)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "COURSEWISE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format (text, json)
    #[arg(long, global = true, env = "COURSEWISE_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the recommendation HTTP server
    #[command(name = "serve")]
    Serve,

    /// Recommend courses similar to COURSE
    #[command(name = "recommend")]
    Recommend {
        #[command(flatten)]
        args: commands::recommend::RecommendArgs,
    },

    /// List every course in the model
    #[command(name = "courses")]
    Courses {
        #[command(flatten)]
        args: commands::courses::CoursesArgs,
    },

    /// Model artifact tooling
    #[command(name = "model")]
    Model {
        #[command(subcommand)]
        command: ModelCommand,
    },

    /// Check the health of a running server
    #[command(name = "status")]
    Status,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("{}", "No command specified. Use --help for usage.".yellow());
        std::process::exit(1);
    };

    let log_level = cli.log_level.as_deref();
    let log_format = cli.log_format.as_deref();

    match command {
        // config commands load the configuration themselves; a broken file must not stop them
        Commands::Config { command } => {
            init_logging(log_level, log_format, None)?;
            commands::config::handle_command(command, cli.config).await
        }
        Commands::Serve => {
            let config = load_config(cli.config, log_level, log_format)?;
            server::start_server(config, cli.host, cli.port).await
        }
        Commands::Recommend { args } => {
            let config = load_config(cli.config, log_level, log_format)?;
            commands::recommend::execute(args, &config)
        }
        Commands::Courses { args } => {
            let config = load_config(cli.config, log_level, log_format)?;
            commands::courses::execute(args, &config)
        }
        Commands::Model { command } => {
            let config = load_config(cli.config, log_level, log_format)?;
            commands::model::handle_command(command, &config)
        }
        Commands::Status => {
            let config = load_config(cli.config, log_level, log_format)?;
            commands::status::execute(&config, cli.host, cli.port).await
        }
    }
}

/// Load configuration, then initialize logging from it.
fn load_config(
    path: Option<PathBuf>,
    log_level: Option<&str>,
    log_format: Option<&str>,
) -> Result<ServiceConfigManifest> {
    let config =
        ServiceConfigManifest::load_or_default(path).context("Failed to load configuration")?;

    init_logging(log_level, log_format, Some(&config))?;
    info!("Configuration loaded: {}", config.metadata.name);

    Ok(config)
}

/// Initialize tracing subscriber for logging.
///
/// Precedence: `RUST_LOG`, then CLI flags, then `spec.observability.logging`.
fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
    config: Option<&ServiceConfigManifest>,
) -> Result<()> {
    let logging = config.and_then(|c| c.logging());
    let level = level
        .or(logging.map(|l| l.level.as_str()))
        .unwrap_or("info");
    let format = format
        .or(logging.map(|l| l.format.as_str()))
        .unwrap_or("text");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        "json" => builder.json().init(),
        "text" => builder.compact().init(),
        other => anyhow::bail!("Invalid log format: '{}'. Must be 'json' or 'text'", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_subcommand_parses() {
        for args in [
            vec!["coursewise", "serve"],
            vec!["coursewise", "recommend", "Intro to Rust", "-k", "2", "--json"],
            vec!["coursewise", "courses"],
            vec!["coursewise", "model", "inspect"],
            vec!["coursewise", "model", "convert", "in.json", "out.bin"],
            vec!["coursewise", "status", "--port", "5001"],
            vec!["coursewise", "config", "show", "--paths"],
        ] {
            let cli = Cli::try_parse_from(args.clone()).unwrap();
            assert!(cli.command.is_some(), "{:?}", args);
        }
    }
}
