//! Repository for `permissions` and the `users_permissions` join table.

use plantseed_core::permissions::Permissions;
use plantseed_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::{timed, DbError};

pub struct PermissionRepo;

impl PermissionRepo {
    /// All permission codes granted to a user.
    pub async fn get_all_for_user(pool: &PgPool, user_id: DbId) -> Result<Permissions, DbError> {
        let codes: Vec<String> = timed(
            sqlx::query_scalar(
                "SELECT permissions.code
                 FROM permissions
                 INNER JOIN users_permissions ON users_permissions.permission_id = permissions.id
                 WHERE users_permissions.user_id = $1
                 ORDER BY permissions.code",
            )
            .bind(user_id)
            .fetch_all(pool),
        )
        .await?;
        Ok(Permissions::from(codes))
    }

    /// Grant the given permission codes to a user. Unknown codes and existing
    /// grants are ignored.
    pub async fn add_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        codes: &[&str],
    ) -> Result<(), DbError> {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        timed(
            sqlx::query(
                "INSERT INTO users_permissions (user_id, permission_id)
                 SELECT $1, permissions.id FROM permissions WHERE permissions.code = ANY($2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(&codes)
            .execute(executor),
        )
        .await?;
        Ok(())
    }
}
