//! Route definitions for the `/tokens` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::tokens;
use crate::state::AppState;

/// Token routes.
///
/// ```text
/// POST /tokens/authentication   -> create_authentication_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/tokens/authentication", post(tokens::create_authentication_token))
}
