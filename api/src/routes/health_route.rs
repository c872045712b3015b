//! GET /health — reachability snapshot of the configured LLM backends.

use std::sync::Arc;

use axum::{Json, extract::State};
use llm_service::HealthStatus;

use crate::core::app_state::AppState;

/// Handler: GET /health
///
/// Always responds 200; each entry carries its own `ok` flag.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Vec<HealthStatus>> {
    Json(state.llm.health_all().await)
}
