// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `coursewise status` - query `/health` of a running server

use anyhow::Result;
use colored::Colorize;
use serde::Deserialize;
use std::time::Duration;

use coursewise_core::domain::service_config::ServiceConfigManifest;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerStatus {
    Running(HealthSummary),
    Unhealthy { error: String },
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthSummary {
    pub status: String,
    pub course_count: usize,
    pub uptime_seconds: u64,
}

pub async fn execute(
    config: &ServiceConfigManifest,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| client_host(&config.spec.server.bind_address));
    let port = port.unwrap_or(config.spec.server.port);

    match check_server(&host, port).await? {
        ServerStatus::Running(health) if health.status == "ready" => {
            println!("{}", "✓ coursewise is running".green());
            println!("  Courses: {}", health.course_count);
            println!("  Uptime: {}s", health.uptime_seconds);
        }
        ServerStatus::Running(health) => {
            println!(
                "{}",
                "⚠ coursewise is running without a model".yellow()
            );
            println!("  Status: {}", health.status);
            println!("  Uptime: {}s", health.uptime_seconds);
        }
        ServerStatus::Unhealthy { error } => {
            println!("{}", "⚠ coursewise is unhealthy".yellow());
            println!("  Error: {}", error);
        }
        ServerStatus::Stopped => {
            println!("{}", format!("✗ coursewise is not reachable at {}:{}", host, port).red());
            std::process::exit(1);
        }
    }

    Ok(())
}

/// A wildcard bind address is not dialable; probe loopback instead.
fn client_host(bind_address: &str) -> String {
    match bind_address {
        "0.0.0.0" | "::" | "[::]" => "127.0.0.1".to_string(),
        other => other.to_string(),
    }
}

/// Check whether a server answers its health endpoint.
pub async fn check_server(host: &str, port: u16) -> Result<ServerStatus> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()?;

    let base_url = if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    };

    match client.get(format!("{}/health", base_url)).send().await {
        Ok(resp) if resp.status().is_success() => match resp.json::<HealthSummary>().await {
            Ok(health) => Ok(ServerStatus::Running(health)),
            Err(e) => Ok(ServerStatus::Unhealthy {
                error: format!("Invalid health response: {}", e),
            }),
        },
        Ok(resp) => Ok(ServerStatus::Unhealthy {
            error: format!("HTTP {}", resp.status()),
        }),
        Err(_) => Ok(ServerStatus::Stopped),
    }
}
