use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use nq_core::Result;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/search", get(handlers::search))
        .route("/api/articles", get(handlers::list_articles).post(handlers::create_article))
        .route("/api/articles/count", get(handlers::count_articles))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serves the app on `addr` until the process receives Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Server running on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use nq_core::{Article, Error, Result};
}
