//! Handler for the healthcheck endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub environment: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Healthcheck response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `available`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub system_info: SystemInfo,
    pub db_healthy: bool,
}

/// GET /v1/healthcheck
///
/// Always 200; a database outage is reported in the body, not the status.
pub async fn healthcheck(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = plantseed_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "available" } else { "degraded" };

    Json(HealthResponse {
        status,
        system_info: SystemInfo {
            environment: state.config.environment.clone(),
            version: env!("CARGO_PKG_VERSION"),
        },
        db_healthy,
    })
}
