use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Mount the healthcheck (under `/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/healthcheck", get(health::healthcheck))
}
