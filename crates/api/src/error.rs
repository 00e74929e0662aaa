use aibuilder_backend::BackendError;
use aibuilder_core::error::CoreError;
use aibuilder_session::SessionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, the session store and backend
/// client errors, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `aibuilder_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session store failed.
    #[error("Session store error: {0}")]
    Session(#[from] SessionError),

    /// The backend or identity provider could not be reached or answered
    /// with something unusable.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

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
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Collaborators ---
            AppError::Session(err) => {
                tracing::error!(error = %err, "Session store error");
                internal()
            }
            AppError::Backend(err) => classify_backend_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Timeouts map to 504, everything else from upstream to 502. The upstream
/// body is logged, never returned.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Request(e) if e.is_timeout() => {
            tracing::error!(error = %e, "Backend request timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "BACKEND_TIMEOUT",
                "The backend service did not respond in time".to_string(),
            )
        }
        BackendError::Api { status, body } => {
            tracing::error!(status, body = %body, "Backend returned an error");
            bad_gateway()
        }
        other => {
            tracing::error!(error = %other, "Backend request failed");
            bad_gateway()
        }
    }
}

fn bad_gateway() -> (StatusCode, &'static str, String) {
    (
        StatusCode::BAD_GATEWAY,
        "BACKEND_ERROR",
        "The backend service is unavailable".to_string(),
    )
}
