use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chat_engine::{ChatError, GenerationFailure};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("startup failed: {0}")]
    Startup(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only; never reaches a live request
            AppError::Startup(_) => StatusCode::INTERNAL_SERVER_ERROR,

            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Startup(_) => "STARTUP_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Convert per-turn engine errors to `AppError::Http` with precise HTTP
/// status & code. Timeouts get 504 so callers can tell them from backend
/// failures (502).
impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Retrieval(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "EMBEDDING_FAILED",
                message: e.to_string(),
            },
            ChatError::Generation(GenerationFailure::Timeout(elapsed)) => AppError::Http {
                status: StatusCode::GATEWAY_TIMEOUT,
                code: "GENERATION_TIMEOUT",
                message: format!("generation timed out after {elapsed:?}"),
            },
            ChatError::Generation(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "GENERATION_FAILED",
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_index::IndexError;
    use std::time::Duration;

    #[test]
    fn chat_errors_map_to_distinct_statuses() {
        let embedding: AppError =
            ChatError::Retrieval(IndexError::EmbeddingFailure("down".into())).into();
        assert_eq!(embedding.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(embedding.error_code(), "EMBEDDING_FAILED");

        let timeout: AppError =
            ChatError::Generation(GenerationFailure::Timeout(Duration::from_secs(120))).into();
        assert_eq!(timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(timeout.error_code(), "GENERATION_TIMEOUT");

        let backend: AppError =
            ChatError::Generation(GenerationFailure::Backend("boom".into())).into();
        assert_eq!(backend.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(backend.error_code(), "GENERATION_FAILED");
    }
}
