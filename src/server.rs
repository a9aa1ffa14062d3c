//! # Server Module
//!
//! HTTP server setup and route configuration for the register relay.

use std::sync::Arc;

use axum::{Router, routing::{get, post}};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::onchain_instance::instance::RegisterProgramInstance;
use crate::routes::{health::ping, register::{decode_body, register}};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub register: Arc<RegisterProgramInstance>,
    pub default_destination: u32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/api/v1/register", post(register))
        .route("/api/v1/register/decode-body", post(decode_body))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Bind and serve until the process is terminated.
pub async fn start(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {} - port may already be in use: {}", addr, e))?;

    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/ping", addr);
    tracing::info!("📨 Register endpoint available at http://{}/api/v1/register", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
