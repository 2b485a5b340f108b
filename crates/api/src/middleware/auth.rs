//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use plantseed_core::permissions::Permissions;
use plantseed_core::users::{validate_token_plaintext, TokenScope};
use plantseed_core::validator::Validator;
use plantseed_db::models::user::User;
use plantseed_db::repositories::{PermissionRepo, UserRepo};
use plantseed_db::{DbError, DbPool};

use crate::auth::token::hash_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The caller of a request.
///
/// A request without an `Authorization` header is [`Principal::Anonymous`].
/// A header that is present but malformed, or that carries an unknown or
/// expired token, is rejected with 401 and `WWW-Authenticate: Bearer`.
#[derive(Debug, Clone)]
pub enum Principal {
    Anonymous,
    User(User),
}

impl Principal {
    /// Permission codes held by this principal. Anonymous callers hold none.
    pub async fn permissions(&self, pool: &DbPool) -> AppResult<Permissions> {
        match self {
            Principal::Anonymous => Ok(Permissions::default()),
            Principal::User(user) => Ok(PermissionRepo::get_all_for_user(pool, user.id).await?),
        }
    }
}

/// Pull the token out of `Bearer <token>`, rejecting anything else.
fn bearer_token(header: &str) -> AppResult<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidAuthenticationToken)?;

    let mut v = Validator::new();
    validate_token_plaintext(&mut v, token);
    if !v.valid() {
        return Err(AppError::InvalidAuthenticationToken);
    }
    Ok(token)
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Principal::Anonymous);
        };
        let header = header
            .to_str()
            .map_err(|_| AppError::InvalidAuthenticationToken)?;
        let token = bearer_token(header)?;

        match UserRepo::get_for_token(&state.pool, TokenScope::Authentication, &hash_token(token))
            .await
        {
            Ok(user) => Ok(Principal::User(user)),
            Err(DbError::RecordNotFound) => Err(AppError::InvalidAuthenticationToken),
            Err(e) => Err(e.into()),
        }
    }
}
