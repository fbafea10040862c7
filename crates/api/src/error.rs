use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clienthub_backend::BackendError;
use clienthub_core::error::CoreError;
use serde_json::json;

use crate::query::QueryError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `clienthub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A read of projects or deliverables failed or was discarded.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The backend could not serve a request; the message is user-displayable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Query errors ---
            AppError::Query(QueryError::Backend(err)) => classify_backend_error(err),
            AppError::Query(QueryError::Superseded | QueryError::Cancelled) => (
                StatusCode::CONFLICT,
                "SUPERSEDED",
                "The request was superseded or cancelled".to_string(),
            ),

            // --- HTTP-specific errors ---
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "BACKEND_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a backend failure into an HTTP status, error code, and message.
///
/// - A rejected access token maps to 401.
/// - Everything else is a failed upstream fetch: 502 with a sanitized message.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    if err.is_unauthorized() {
        return (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Session is no longer valid".to_string(),
        );
    }
    tracing::error!(error = %err, "Backend query failed");
    (
        StatusCode::BAD_GATEWAY,
        "QUERY_FAILED",
        "Failed to load data. Please try again.".to_string(),
    )
}
