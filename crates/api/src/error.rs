use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scale_core::error::CoreError;
use scale_db::error::classify_sqlx_error;
use scale_db::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors plus the storage error types handlers
/// propagate with `?`.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `scale_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from a multi-step repository operation.
    #[error(transparent)]
    Db(#[from] DbError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Core(core) => core_parts(core),
            AppError::Db(err) => core_parts(err.into()),
            AppError::Database(err) => core_parts(classify_sqlx_error(&err)),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to status, error code and client-facing message.
fn core_parts(err: CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Malformed(msg) => {
            tracing::warn!(error = %msg, "Malformed stored document");
            (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_DOCUMENT", msg)
        }
        CoreError::Internal(msg) => internal(&msg),
    }
}

/// Log the detail, hide it from the client.
fn internal(detail: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
