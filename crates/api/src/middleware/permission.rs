//! Permission-checking extractors.
//!
//! [`RequirePermission`] wraps [`Principal`] and rejects the request before
//! the handler body runs unless the caller is an activated user holding the
//! required permission code.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use plantseed_core::error::CoreError;
use plantseed_core::permissions::{PLANTSEED_READ, PLANTSEED_WRITE};
use plantseed_db::models::user::User;

use super::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// A permission code checked at the type level.
pub trait RequiredPermission {
    const CODE: &'static str;
}

pub struct PlantseedRead;

impl RequiredPermission for PlantseedRead {
    const CODE: &'static str = PLANTSEED_READ;
}

pub struct PlantseedWrite;

impl RequiredPermission for PlantseedWrite {
    const CODE: &'static str = PLANTSEED_WRITE;
}

/// Requires an activated user holding `P::CODE`.
///
/// ```ignore
/// async fn create(auth: RequirePlantseedWrite) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "allowed");
///     Ok(Json(()))
/// }
/// ```
pub struct RequirePermission<P> {
    pub user: User,
    _permission: PhantomData<P>,
}

pub type RequirePlantseedRead = RequirePermission<PlantseedRead>;
pub type RequirePlantseedWrite = RequirePermission<PlantseedWrite>;

impl<P> FromRequestParts<AppState> for RequirePermission<P>
where
    P: RequiredPermission + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;

        let user = match principal {
            Principal::Anonymous => {
                return Err(AppError::Core(CoreError::Unauthorized(
                    "you must be authenticated to access this resource".into(),
                )));
            }
            Principal::User(ref user) if !user.activated => {
                return Err(AppError::Core(CoreError::Forbidden(
                    "your user account must be activated to access this resource".into(),
                )));
            }
            Principal::User(ref user) => user.clone(),
        };

        let permissions = principal.permissions(&state.pool).await?;
        if !permissions.includes(P::CODE) {
            tracing::debug!(user_id = user.id, permission = P::CODE, "Permission denied");
            return Err(AppError::Core(CoreError::Forbidden(
                "your user account doesn't have the necessary permissions to access this resource"
                    .into(),
            )));
        }

        Ok(Self {
            user,
            _permission: PhantomData,
        })
    }
}
