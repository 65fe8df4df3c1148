//! HTTP API module for Calcore
//!
//! Provides REST API endpoints for structured and natural-language
//! calculations plus the shared calculation history.

pub mod routes;

use crate::error::Result;
use crate::history::HistoryStore;
use crate::phrase::PhraseParser;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Bounded calculation history, newest first
    pub history: Arc<HistoryStore>,
    /// Compiled natural-language phrase patterns
    pub parser: Arc<PhraseParser>,
}

/// Start the HTTP API server
pub async fn serve(addr: SocketAddr, history: Arc<HistoryStore>) -> Result<()> {
    let state = AppState {
        history,
        parser: Arc::new(PhraseParser::new()),
    };

    let app = create_router(state);

    // Check if port is already in use (another calcore instance running)
    if tokio::net::TcpStream::connect(addr).await.is_ok() {
        tracing::error!(
            "Port {} is already in use — another calcore instance may be running. \
             Use `curl http://{}/health` to check.",
            addr.port(),
            addr
        );
        return Err(crate::error::CoreError::Api(format!(
            "Port {} already in use",
            addr.port()
        )));
    }

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::error::CoreError::Api(e.to_string()))?;

    Ok(())
}

/// Create the API router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/calc", post(routes::calc))
        .route("/nl-calc", post(routes::nl_calc))
        .route("/history", get(routes::get_history))
        .route("/history", delete(routes::clear_history));

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
