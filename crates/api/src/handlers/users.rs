//! Handlers for the `/users` resource (registration and activation).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use plantseed_core::permissions::DEFAULT_USER_PERMISSIONS;
use plantseed_core::users::{
    validate_token_plaintext, validate_user, TokenScope, ACTIVATION_TOKEN_TTL_HOURS,
};
use plantseed_core::validator::{FieldErrors, Validator};
use plantseed_db::models::user::{CreateUser, RegisterUser};
use plantseed_db::repositories::user_repo::EMAIL_UNIQUE_INDEX;
use plantseed_db::repositories::{PermissionRepo, TokenRepo, UserRepo};
use plantseed_db::DbError;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::auth::token::{generate_token, hash_token};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::mailer::WelcomeEmail;
use crate::response::UserResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /v1/users/activated`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActivateUser {
    pub token: String,
}

fn field_error(key: &str, message: &str) -> AppError {
    let mut errors = FieldErrors::new();
    errors.insert(key.to_string(), message.to_string());
    AppError::FailedValidation(errors)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/users
///
/// Create an inactive account holding `plantseed:read` and email it an
/// activation token. The user row, its permission grant and the activation
/// token are written in one transaction. The email goes out in the
/// background once that commits; the response does not wait for it.
pub async fn register_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let mut v = Validator::new();
    validate_user(&mut v, &input.name, &input.email, &input.password);
    v.into_result().map_err(AppError::FailedValidation)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name: input.name,
        email: input.email,
        password_hash,
        activated: false,
    };

    let mut tx = state.pool.begin().await.map_err(DbError::from)?;

    let user = match UserRepo::insert(&mut *tx, &create).await {
        Ok(user) => user,
        Err(e) if e.is_unique_violation(EMAIL_UNIQUE_INDEX) => {
            return Err(field_error(
                "email",
                "a user with this email address already exists",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    PermissionRepo::add_for_user(&mut *tx, user.id, DEFAULT_USER_PERMISSIONS).await?;

    let activation = generate_token(
        user.id,
        Duration::hours(ACTIVATION_TOKEN_TTL_HOURS),
        TokenScope::Activation,
    );
    TokenRepo::insert(&mut *tx, &activation.record).await?;

    tx.commit().await.map_err(DbError::from)?;

    let email = WelcomeEmail {
        recipient: user.email.clone(),
        user_id: user.id,
        activation_token: activation.plaintext,
    };
    let mailer = state.mailer.clone();
    state.background.spawn(async move {
        if let Err(e) = mailer.send_welcome(&email).await {
            tracing::error!(error = %e, user_id = email.user_id, "Failed to send welcome email");
        }
    });

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::ACCEPTED, Json(UserResponse { user })))
}

/// PUT /v1/users/activated
///
/// Exchange an activation token for an activated account. All of the user's
/// activation tokens are revoked on success.
pub async fn activate_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<ActivateUser>,
) -> AppResult<Json<UserResponse>> {
    let mut v = Validator::new();
    validate_token_plaintext(&mut v, &input.token);
    v.into_result().map_err(AppError::FailedValidation)?;

    let mut user = match UserRepo::get_for_token(
        &state.pool,
        TokenScope::Activation,
        &hash_token(&input.token),
    )
    .await
    {
        Ok(user) => user,
        Err(DbError::RecordNotFound) => {
            return Err(field_error("token", "invalid or expired activation token"));
        }
        Err(e) => return Err(e.into()),
    };

    user.activated = true;
    UserRepo::update(&state.pool, &mut user).await?;

    TokenRepo::delete_all_for_user(&state.pool, TokenScope::Activation, user.id).await?;

    tracing::info!(user_id = user.id, "User activated");

    Ok(Json(UserResponse { user }))
}
