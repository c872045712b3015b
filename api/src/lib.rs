//! Thin HTTP layer over the chat engine.
//!
//! Routes:
//! - `GET  /`       — bundled chat page
//! - `POST /chat`   — one conversation turn (`{question, context}` →
//!   `{response, context}`)
//! - `GET  /health` — LLM backend reachability snapshot
//!
//! Everything here is marshaling and error mapping; the pipeline itself lives
//! in `chat-engine` and `doc-index`.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::routes::{chat::chat_route::chat, health_route::health, index_route::index};

/// Initializes shared state (including the index build) and serves until
/// Ctrl+C.
///
/// # Errors
/// Returns [`AppError::Startup`] for fatal configuration problems and
/// [`AppError::Bind`]/[`AppError::Server`] for listener failures.
pub async fn serve() -> Result<(), AppError> {
    let state = Arc::new(AppState::initialize().await?);

    let app = Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state);

    let address = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".into());
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(AppError::Bind)?;
    info!(%address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
}
