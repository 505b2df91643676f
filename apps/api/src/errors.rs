use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A résumé reference that does not resolve to readable text.
    #[error("Resume resolution error: {0}")]
    Resolution(String),

    /// The Evaluation Store could not record the evaluation.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Badge Issuer delivery failure. Logged and swallowed by the evaluator.
    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status, code and client-facing message. Server-side variants get a fixed
    /// message; their detail only goes to the log.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Resolution(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RESOLUTION_ERROR",
                msg.clone(),
            ),
            AppError::Persistence(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "PERSISTENCE_ERROR",
                "The evaluation could not be recorded; no score was issued".to_string(),
            ),
            AppError::Notification(_) => (
                StatusCode::BAD_GATEWAY,
                "NOTIFICATION_ERROR",
                "A downstream notification failed".to_string(),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "A database error occurred".to_string(),
            ),
            AppError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                "A storage error occurred".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            ),
        }
    }

    /// The message a client may see, used for batch error entries.
    pub fn public_message(&self) -> String {
        self.parts().2
    }
}

/// Undecodable JSON bodies are validation failures, not axum's plain-text 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Persistence(msg) => tracing::error!("Persistence error: {msg}"),
            AppError::Notification(msg) => tracing::error!("Notification error: {msg}"),
            AppError::Database(e) => tracing::error!("Database error: {e}"),
            AppError::Storage(msg) => tracing::error!("Storage error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        let (status, code, message) = self.parts();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
