//! POST /chat — one RAG-grounded conversation turn.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/chat \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is the capital of France?","context":""}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let turn = state.engine.answer(&body.question, &body.context).await?;

    Ok(Json(ChatResponse {
        response: turn.response,
        context: turn.context,
    }))
}
