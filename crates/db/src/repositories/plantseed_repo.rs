//! Repository for the `plantseed` table.

use plantseed_core::filters::{calculate_metadata, Filters, Metadata};
use plantseed_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::plantseed::{CreatePlantseed, Plantseed, PlantseedListParams};
use crate::{timed, DbError};

/// Columns of a full row, in `FromRow` order.
const COLUMNS: &str = "id, created_at, name, family, amount, price, version";

/// A page row: the record plus the window count of all matching rows.
#[derive(FromRow)]
struct PlantseedPageRow {
    total_records: i64,
    #[sqlx(flatten)]
    plantseed: Plantseed,
}

/// Provides CRUD operations for plantseeds.
pub struct PlantseedRepo;

impl PlantseedRepo {
    /// Insert a new plantseed. The store assigns `id`, `created_at` and `version`.
    pub async fn insert(pool: &PgPool, input: &CreatePlantseed) -> Result<Plantseed, DbError> {
        let query = format!(
            "INSERT INTO plantseed (name, family, amount, price)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        timed(
            sqlx::query_as::<_, Plantseed>(&query)
                .bind(&input.name)
                .bind(&input.family)
                .bind(input.amount)
                .bind(input.price)
                .fetch_one(pool),
        )
        .await
    }

    /// Fetch a plantseed by id.
    ///
    /// Ids below 1 are rejected without touching the database.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Plantseed, DbError> {
        if id < 1 {
            return Err(DbError::RecordNotFound);
        }

        let query = format!("SELECT {COLUMNS} FROM plantseed WHERE id = $1");
        timed(
            sqlx::query_as::<_, Plantseed>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(DbError::RecordNotFound)
    }

    /// Replace every mutable field of `record`, provided its `version` still
    /// matches the stored row. On success `record.version` is advanced.
    ///
    /// Fails with [`DbError::EditConflict`] if the row was changed or deleted
    /// since `record` was read.
    pub async fn update(pool: &PgPool, record: &mut Plantseed) -> Result<(), DbError> {
        let new_version: Option<i32> = timed(
            sqlx::query_scalar(
                "UPDATE plantseed
                 SET name = $1, family = $2, amount = $3, price = $4, version = version + 1
                 WHERE id = $5 AND version = $6
                 RETURNING version",
            )
            .bind(&record.name)
            .bind(&record.family)
            .bind(record.amount)
            .bind(record.price)
            .bind(record.id)
            .bind(record.version)
            .fetch_optional(pool),
        )
        .await?;

        record.version = new_version.ok_or(DbError::EditConflict)?;
        Ok(())
    }

    /// Delete a plantseed by id.
    ///
    /// Ids below 1 are rejected without touching the database.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), DbError> {
        if id < 1 {
            return Err(DbError::RecordNotFound);
        }

        let result = timed(
            sqlx::query("DELETE FROM plantseed WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::RecordNotFound);
        }
        Ok(())
    }

    /// List one page of plantseeds matching the text filters, ordered by the
    /// validated sort with `id` as tiebreak.
    pub async fn get_all(
        pool: &PgPool,
        params: &PlantseedListParams,
        filters: &Filters,
    ) -> Result<(Vec<Plantseed>, Metadata), DbError> {
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS}
             FROM plantseed
             WHERE (to_tsvector('simple', name) @@ plainto_tsquery('simple', $1) OR $1 = '')
               AND (to_tsvector('simple', family) @@ plainto_tsquery('simple', $2) OR $2 = '')
             ORDER BY {} {}, id ASC
             LIMIT $3 OFFSET $4",
            filters.sort_column()?,
            filters.sort_direction().as_sql(),
        );

        let rows = timed(
            sqlx::query_as::<_, PlantseedPageRow>(&query)
                .bind(&params.name)
                .bind(&params.family)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(pool),
        )
        .await?;

        let total_records = rows.first().map_or(0, |r| r.total_records);
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);
        let plantseeds = rows.into_iter().map(|r| r.plantseed).collect();

        tracing::debug!(total_records, page = filters.page, "Listed plantseeds");

        Ok((plantseeds, metadata))
    }
}
