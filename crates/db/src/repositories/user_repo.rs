//! Repository for the `users` table.

use plantseed_core::users::TokenScope;
use sqlx::{PgExecutor, PgPool};

use crate::models::user::{CreateUser, User};
use crate::{timed, DbError};

/// Columns of a full row, in `FromRow` order.
const COLUMNS: &str = "id, created_at, name, email, password_hash, activated, version";

/// Name of the unique index guarding `users.email`.
pub const EMAIL_UNIQUE_INDEX: &str = "uq_users_email";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email surfaces as a unique violation on
    /// [`EMAIL_UNIQUE_INDEX`]; see [`DbError::is_unique_violation`].
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, DbError> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, activated)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        timed(
            sqlx::query_as::<_, User>(&query)
                .bind(&input.name)
                .bind(&input.email)
                .bind(&input.password_hash)
                .bind(input.activated)
                .fetch_one(executor),
        )
        .await
    }

    /// Find a user by email, ignoring case.
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<User, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        timed(
            sqlx::query_as::<_, User>(&query)
                .bind(email)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(DbError::RecordNotFound)
    }

    /// Persist `name`, `email`, `password_hash` and `activated`, provided the
    /// stored version still matches. On success `user.version` is advanced.
    pub async fn update(pool: &PgPool, user: &mut User) -> Result<(), DbError> {
        let new_version: Option<i32> = timed(
            sqlx::query_scalar(
                "UPDATE users
                 SET name = $1, email = $2, password_hash = $3, activated = $4,
                     version = version + 1
                 WHERE id = $5 AND version = $6
                 RETURNING version",
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.activated)
            .bind(user.id)
            .bind(user.version)
            .fetch_optional(pool),
        )
        .await?;

        user.version = new_version.ok_or(DbError::EditConflict)?;
        Ok(())
    }

    /// Find the owner of an unexpired token with the given scope and hash.
    pub async fn get_for_token(
        pool: &PgPool,
        scope: TokenScope,
        token_hash: &str,
    ) -> Result<User, DbError> {
        let query = "SELECT users.id, users.created_at, users.name, users.email,
                            users.password_hash, users.activated, users.version
                     FROM users
                     INNER JOIN tokens ON users.id = tokens.user_id
                     WHERE tokens.hash = $1
                       AND tokens.scope = $2
                       AND tokens.expiry > NOW()";
        timed(
            sqlx::query_as::<_, User>(query)
                .bind(token_hash)
                .bind(scope.as_str())
                .fetch_optional(pool),
        )
        .await?
        .ok_or(DbError::RecordNotFound)
    }
}
