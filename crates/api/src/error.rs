use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use plantseed_core::error::CoreError;
use plantseed_core::validator::FieldErrors;
use plantseed_db::DbError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`DbError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `plantseed_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error from `plantseed_db`.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Input failed validation; carries the field -> message map.
    #[error("Failed validation: {0:?}")]
    FailedValidation(FieldErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or resource matches the request.
    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The bearer token is malformed, unknown or expired.
    #[error("Invalid authentication token")]
    InvalidAuthenticationToken,

    #[error("Invalid authentication credentials")]
    InvalidCredentials,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
const EDIT_CONFLICT_MESSAGE: &str =
    "unable to update the record due to an edit conflict, please try again";
const INTERNAL_MESSAGE: &str = "the server encountered a problem and could not process your request";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message): (StatusCode, &str, Value) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Repository errors ---
            AppError::Db(db) => classify_db_error(db),

            // --- HTTP-specific errors ---
            AppError::FailedValidation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "FAILED_VALIDATION",
                json!(errors),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", json!(msg)),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", json!(NOT_FOUND_MESSAGE)),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                json!("the method is not supported for this resource"),
            ),
            AppError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED",
                json!("rate limit exceeded"),
            ),
            AppError::InvalidAuthenticationToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                json!("invalid or missing authentication token"),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                json!("invalid authentication credentials"),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();
        if matches!(self, AppError::InvalidAuthenticationToken) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

fn internal() -> (StatusCode, &'static str, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        json!(INTERNAL_MESSAGE),
    )
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, Value) {
    match core {
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", json!(msg)),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", json!(msg)),
        CoreError::UnsafeSort(_) => {
            tracing::error!(error = %core, "Internal core error");
            internal()
        }
    }
}

/// Classify a repository error into an HTTP status, error code, and message.
///
/// - `RecordNotFound` maps to 404, `EditConflict` to 409.
/// - Timeouts and driver errors map to 500 with a sanitized message.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, Value) {
    match err {
        DbError::RecordNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", json!(NOT_FOUND_MESSAGE)),
        DbError::EditConflict => (
            StatusCode::CONFLICT,
            "EDIT_CONFLICT",
            json!(EDIT_CONFLICT_MESSAGE),
        ),
        DbError::Core(core) => classify_core_error(core),
        DbError::Timeout(after) => {
            tracing::error!(?after, "Database query timed out");
            internal()
        }
        DbError::Sqlx(sqlx_err) => {
            tracing::error!(error = %sqlx_err, "Database error");
            internal()
        }
    }
}

/// Response produced by `CatchPanicLayer` when a handler panics.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(format!("handler panicked: {detail}")).into_response()
}
