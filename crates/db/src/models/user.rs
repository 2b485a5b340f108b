//! User entity model and DTOs.

use plantseed_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub created_at: Timestamp,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub activated: bool,
    #[serde(skip_serializing)]
    pub version: i32,
}

/// DTO for inserting a user. The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub activated: bool,
}

/// Request body for `POST /v1/users`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
