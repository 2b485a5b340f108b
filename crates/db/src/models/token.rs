//! Token model and DTOs.

use plantseed_core::types::{DbId, Timestamp};
use plantseed_core::users::TokenScope;
use serde::Serialize;

/// DTO for inserting a token. Only the SHA-256 hash is stored.
#[derive(Debug)]
pub struct CreateToken {
    pub hash: String,
    pub user_id: DbId,
    pub expiry: Timestamp,
    pub scope: TokenScope,
}

/// Plaintext token returned to the client exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expiry: Timestamp,
}
