use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/articles", get(handlers::list_articles))
        .route(
            "/api/site-config",
            get(handlers::get_site_config).post(handlers::update_site_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `config.bind` and serves the API until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let bind = config.bind;
    let state = AppState::from_config(&config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

pub mod prelude {
    pub use crate::{create_app, AppState, ServerConfig};
    pub use rh_core::{Article, Error, Result};
}
