pub mod health;
pub mod plantseed;
pub mod tokens;
pub mod users;

use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// /healthcheck                   healthcheck (public)
///
/// /plantseed                     list (plantseed:read), create (plantseed:write)
/// /plantseed/{id}                show (plantseed:read), update, delete (plantseed:write)
///
/// /users                         register (public)
/// /users/activated               activate (public, token in body)
///
/// /tokens/authentication         issue bearer token (public)
/// ```
///
/// A known path requested with an unsupported method answers 405 JSON.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(plantseed::router())
        .merge(users::router())
        .merge(tokens::router())
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed })
}
