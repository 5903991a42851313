use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::config::FarecastConfig;
use crate::predict::FareClient;

/// Assemble the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new("assets"))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
}

pub async fn run(config: FarecastConfig) -> Result<()> {
    let client = FareClient::new(&config.prediction)?;
    let state = AppState::new(client, config.defaults.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Ride form running at http://localhost:{}", config.server.port);
    axum::serve(listener, app(state))
        .await
        .context("Server error")?;
    Ok(())
}
