use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use verdict_core::error::CoreError;
use verdict_runner::RunnerError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`RunnerError`] for remote
/// runner failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce the JSON error body `{"detail": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `verdict_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the remote test runner.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Runner errors ---
            AppError::Runner(err) => {
                tracing::error!(error = %err, "Test runner request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "detail": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}
