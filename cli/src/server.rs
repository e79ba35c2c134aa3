// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server startup
//!
//! Loads the model artifact once, then serves the recommendation API until
//! Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use coursewise_core::{
    application::Recommender,
    domain::service_config::{MetricsConfig, ServiceConfigManifest},
    infrastructure::{ArtifactStore, HomePage},
    presentation::api::{app, AppState},
};

pub async fn start_server(
    mut config: ServiceConfigManifest,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.spec.server.bind_address = host;
    }
    if let Some(port) = port {
        config.spec.server.port = port;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    if let Some(metrics) = config.metrics() {
        install_metrics_exporter(&config.spec.server.bind_address, metrics)?;
    }

    let store = ArtifactStore::from_config(&config.spec.model);
    let recommender = Recommender::load(&store);
    if !recommender.is_ready() {
        warn!("Serving without a model; recommendation endpoints will report unavailable");
    }

    let home_page = HomePage::new().context("Failed to initialize home page template")?;
    let state = AppState::new(
        recommender,
        home_page,
        config.metadata.name.clone(),
        config.spec.recommendations,
    );

    let addr = format!(
        "{}:{}",
        config.spec.server.bind_address, config.spec.server.port
    );
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("coursewise listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("coursewise shutting down");

    Ok(())
}

fn install_metrics_exporter(bind_address: &str, metrics: &MetricsConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", bind_address, metrics.port)
        .parse()
        .with_context(|| format!("Invalid metrics listen address {}:{}", bind_address, metrics.port))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    info!("Prometheus metrics exposed on http://{}/metrics", addr);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
