//! Response envelopes for API handlers.
//!
//! Every success body is a single-key object naming what it carries, e.g.
//! `{ "plantseed": ... }`. Use these types instead of ad-hoc `json!` so the
//! shapes are checked at compile time.

use plantseed_core::filters::Metadata;
use plantseed_db::models::plantseed::Plantseed;
use plantseed_db::models::token::IssuedToken;
use plantseed_db::models::user::User;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlantseedResponse {
    pub plantseed: Plantseed,
}

/// Body of `GET /v1/plantseed`.
#[derive(Debug, Serialize)]
pub struct PlantseedListResponse {
    pub plantseeds: Vec<Plantseed>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AuthenticationTokenResponse {
    pub authentication_token: IssuedToken,
}
