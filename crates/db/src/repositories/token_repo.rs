//! Repository for the `tokens` table.

use plantseed_core::types::DbId;
use plantseed_core::users::TokenScope;
use sqlx::{PgExecutor, PgPool};

use crate::models::token::CreateToken;
use crate::{timed, DbError};

/// Provides insert and cleanup operations for tokens.
pub struct TokenRepo;

impl TokenRepo {
    /// Store a token hash.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateToken,
    ) -> Result<(), DbError> {
        timed(
            sqlx::query("INSERT INTO tokens (hash, user_id, expiry, scope) VALUES ($1, $2, $3, $4)")
                .bind(&input.hash)
                .bind(input.user_id)
                .bind(input.expiry)
                .bind(input.scope.as_str())
                .execute(executor),
        )
        .await?;
        Ok(())
    }

    /// Delete every token of `scope` belonging to a user. Returns the count removed.
    pub async fn delete_all_for_user(
        pool: &PgPool,
        scope: TokenScope,
        user_id: DbId,
    ) -> Result<u64, DbError> {
        let result = timed(
            sqlx::query("DELETE FROM tokens WHERE scope = $1 AND user_id = $2")
                .bind(scope.as_str())
                .bind(user_id)
                .execute(pool),
        )
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired tokens of any scope. Returns the count removed.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, DbError> {
        let result = timed(sqlx::query("DELETE FROM tokens WHERE expiry < NOW()").execute(pool)).await?;
        Ok(result.rows_affected())
    }
}
