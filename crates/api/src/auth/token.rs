//! Opaque bearer tokens.
//!
//! Plaintexts are random alphanumeric strings handed to the client once;
//! only their SHA-256 hex digest is persisted.

use chrono::{Duration, Utc};
use plantseed_core::types::DbId;
use plantseed_core::users::{TokenScope, TOKEN_PLAINTEXT_LEN};
use plantseed_db::models::token::{CreateToken, IssuedToken};
use plantseed_db::repositories::TokenRepo;
use plantseed_db::DbPool;
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::AppResult;

/// A freshly generated token: the plaintext for the client and the row to store.
#[derive(Debug)]
pub struct GeneratedToken {
    pub plaintext: String,
    pub record: CreateToken,
}

/// Generate a token for `user_id` valid for `ttl`.
pub fn generate_token(user_id: DbId, ttl: Duration, scope: TokenScope) -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_PLAINTEXT_LEN)
        .map(char::from)
        .collect();

    let record = CreateToken {
        hash: hash_token(&plaintext),
        user_id,
        expiry: Utc::now() + ttl,
        scope,
    };

    GeneratedToken { plaintext, record }
}

/// SHA-256 hex digest of a token plaintext.
pub fn hash_token(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate, persist and return a new token.
pub async fn issue_token(
    pool: &DbPool,
    user_id: DbId,
    ttl: Duration,
    scope: TokenScope,
) -> AppResult<IssuedToken> {
    let generated = generate_token(user_id, ttl, scope);
    TokenRepo::insert(pool, &generated.record).await?;

    tracing::debug!(user_id, %scope, expiry = %generated.record.expiry, "Token issued");

    Ok(IssuedToken {
        token: generated.plaintext,
        expiry: generated.record.expiry,
    })
}
