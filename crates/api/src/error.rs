use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use copydesk_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `copydesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

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
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
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

/// Classify a domain error into an HTTP status, error code, and message.
///
/// - Validation maps to 400, rate limiting to 429.
/// - Remote business-rule failures and partial publishes map to 502.
/// - Unreachable services map to 503 with a generic message.
/// - Internal errors map to 500 with a sanitized message.
pub fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.user_message()),
        CoreError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            err.user_message(),
        ),
        CoreError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            err.user_message(),
        ),
        CoreError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.user_message()),
        CoreError::PartialPublish(_) => (
            StatusCode::BAD_GATEWAY,
            "PARTIAL_PUBLISH",
            err.user_message(),
        ),
        CoreError::Unavailable(msg) => {
            tracing::warn!(error = %msg, "Upstream service unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                err.user_message(),
            )
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.user_message(),
            )
        }
    }
}
