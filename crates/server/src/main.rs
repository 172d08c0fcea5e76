//! HTTP front end: a single page plus a small JSON API over per-user sessions.

mod config;
mod error;
mod routes;
mod state;

use std::time::Duration;

use anyhow::Context;
use brevis_core::{ExtractConfig, Extractor, LazyModel};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("brevis_server=info,brevis_core=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

async fn sweep_sessions(state: AppState) {
    let mut interval = tokio::time::interval(state.session_ttl().max(Duration::from_secs(1)));
    loop {
        interval.tick().await;
        state.sweep_expired().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_tracing();

    let extractor = Extractor::new(ExtractConfig::default().fetch(config.fetch_config()))
        .context("Failed to build HTTP client")?;
    let model_config = config.model_config();
    tracing::info!(?model_config, "summarization model loads on first use");

    let state = AppState::new(extractor, LazyModel::new(model_config))
        .with_session_limits(config.session_ttl(), config.max_sessions);
    tokio::spawn(sweep_sessions(state.clone()));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.context("Server error")?;

    Ok(())
}
