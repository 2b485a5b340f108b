//! Route definitions for the `/users` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User account routes.
///
/// ```text
/// POST /users             -> register_user
/// PUT  /users/activated   -> activate_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register_user))
        .route("/users/activated", put(users::activate_user))
}
