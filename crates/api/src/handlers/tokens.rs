//! Handlers for the `/tokens` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use plantseed_core::users::{
    validate_email, validate_password_plaintext, TokenScope, AUTHENTICATION_TOKEN_TTL_HOURS,
};
use plantseed_core::validator::Validator;
use plantseed_db::repositories::UserRepo;
use plantseed_db::DbError;
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::auth::token::issue_token;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::AuthenticationTokenResponse;
use crate::state::AppState;

/// Request body for `POST /v1/tokens/authentication`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// POST /v1/tokens/authentication
///
/// Exchange email and password for a 24-hour bearer token. Unknown emails
/// and wrong passwords are indistinguishable to the caller.
pub async fn create_authentication_token(
    State(state): State<AppState>,
    AppJson(input): AppJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<AuthenticationTokenResponse>)> {
    let mut v = Validator::new();
    validate_email(&mut v, &input.email);
    validate_password_plaintext(&mut v, &input.password);
    v.into_result().map_err(AppError::FailedValidation)?;

    let user = match UserRepo::get_by_email(&state.pool, &input.email).await {
        Ok(user) => user,
        Err(DbError::RecordNotFound) => return Err(AppError::InvalidCredentials),
        Err(e) => return Err(e.into()),
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Authentication failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let authentication_token = issue_token(
        &state.pool,
        user.id,
        Duration::hours(AUTHENTICATION_TOKEN_TTL_HOURS),
        TokenScope::Authentication,
    )
    .await?;

    tracing::info!(user_id = user.id, "Authentication token issued");

    Ok((
        StatusCode::CREATED,
        Json(AuthenticationTokenResponse {
            authentication_token,
        }),
    ))
}
