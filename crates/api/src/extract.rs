//! Request extractors whose rejections are [`AppError`]s, so malformed
//! input produces the same JSON error bodies as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;
use plantseed_core::types::DbId;

use crate::error::{AppError, AppResult};

/// `axum::Json` with a JSON `400` on syntax errors, type mismatches, unknown
/// fields or a wrong content type.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// The `{id}` path segment as a positive [`DbId`].
///
/// Anything that is not a positive integer is treated as a missing
/// resource (`404`).
#[derive(Debug, Clone, Copy)]
pub struct IdParam(pub DbId);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        parse_id(&raw).map(IdParam)
    }
}

/// Parse a path id, rejecting non-numeric and non-positive values.
pub fn parse_id(raw: &str) -> AppResult<DbId> {
    match raw.parse::<DbId>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::NotFound),
    }
}
