//! Integration tests for plantseed repository operations.
//!
//! Exercise the repository against a real database:
//! - Insert / get round trip
//! - Sentinel errors for missing and invalid ids
//! - Optimistic concurrency on update
//! - Full-text filtering, sorting and pagination
//!
//! `sqlx::test` provisions a fresh database per test from `DATABASE_URL`.

use std::time::Duration;

use assert_matches::assert_matches;
use plantseed_core::filters::Filters;
use plantseed_core::plantseed::SORT_SAFELIST;
use plantseed_db::models::plantseed::{CreatePlantseed, PlantseedListParams};
use plantseed_db::repositories::PlantseedRepo;
use plantseed_db::DbError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_plantseed(name: &str, family: &str, amount: i32, price: i32) -> CreatePlantseed {
    CreatePlantseed {
        name: name.to_string(),
        family: family.to_string(),
        amount,
        price,
    }
}

fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
    Filters {
        page,
        page_size,
        sort: sort.to_string(),
        sort_safelist: SORT_SAFELIST,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_then_get_round_trips(pool: PgPool) {
    let created = PlantseedRepo::insert(&pool, &new_plantseed("Rose", "Rosaceae", 10, 5))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.version, 1);

    let fetched = PlantseedRepo::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched.name, "Rose");
    assert_eq!(fetched.family, "Rosaceae");
    assert_eq!(fetched.amount, 10);
    assert_eq!(fetched.price, 5);
    assert_eq!(fetched.created_at, created.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_rows_are_record_not_found(pool: PgPool) {
    assert_matches!(PlantseedRepo::get(&pool, 9999).await, Err(DbError::RecordNotFound));
    assert_matches!(PlantseedRepo::delete(&pool, 9999).await, Err(DbError::RecordNotFound));
    assert_matches!(PlantseedRepo::get(&pool, 0).await, Err(DbError::RecordNotFound));
    assert_matches!(PlantseedRepo::delete(&pool, -3).await, Err(DbError::RecordNotFound));
}

#[tokio::test]
async fn non_positive_ids_never_reach_the_database() {
    // Port 1 is closed; any query would fail with a connection error instead.
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://postgres@127.0.0.1:1/plantseed")
        .unwrap();

    let outcome = tokio::time::timeout(Duration::from_millis(100), async {
        (
            PlantseedRepo::get(&pool, 0).await,
            PlantseedRepo::delete(&pool, -1).await,
        )
    })
    .await
    .expect("sentinel ids must be rejected without a round trip");

    assert_matches!(outcome.0, Err(DbError::RecordNotFound));
    assert_matches!(outcome.1, Err(DbError::RecordNotFound));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_row(pool: PgPool) {
    let created = PlantseedRepo::insert(&pool, &new_plantseed("Tulip", "Liliaceae", 3, 2))
        .await
        .unwrap();

    PlantseedRepo::delete(&pool, created.id).await.unwrap();

    assert_matches!(PlantseedRepo::get(&pool, created.id).await, Err(DbError::RecordNotFound));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_advances_version(pool: PgPool) {
    let mut record = PlantseedRepo::insert(&pool, &new_plantseed("Rose", "Rosaceae", 10, 5))
        .await
        .unwrap();

    record.price = 8;
    PlantseedRepo::update(&pool, &mut record).await.unwrap();
    assert_eq!(record.version, 2);

    let fetched = PlantseedRepo::get(&pool, record.id).await.unwrap();
    assert_eq!(fetched.price, 8);
    assert_eq!(fetched.version, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_update_is_edit_conflict(pool: PgPool) {
    let created = PlantseedRepo::insert(&pool, &new_plantseed("Rose", "Rosaceae", 10, 5))
        .await
        .unwrap();

    let mut first = created.clone();
    let mut second = created;

    first.amount = 11;
    PlantseedRepo::update(&pool, &mut first).await.unwrap();

    second.amount = 12;
    assert_matches!(
        PlantseedRepo::update(&pool, &mut second).await,
        Err(DbError::EditConflict)
    );

    let fetched = PlantseedRepo::get(&pool, first.id).await.unwrap();
    assert_eq!(fetched.amount, 11);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn schema_rejects_non_positive_amount(pool: PgPool) {
    let result = PlantseedRepo::insert(&pool, &new_plantseed("Rose", "Rosaceae", 0, 5)).await;
    assert_matches!(result, Err(DbError::Sqlx(sqlx::Error::Database(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_all_paginates(pool: PgPool) {
    for i in 1..=45 {
        PlantseedRepo::insert(&pool, &new_plantseed(&format!("Seed {i}"), "Poaceae", i, i))
            .await
            .unwrap();
    }

    let (page, metadata) =
        PlantseedRepo::get_all(&pool, &PlantseedListParams::default(), &filters(2, 20, "id"))
            .await
            .unwrap();

    assert_eq!(page.len(), 20);
    assert_eq!(metadata.current_page, 2);
    assert_eq!(metadata.page_size, 20);
    assert_eq!(metadata.first_page, 1);
    assert_eq!(metadata.last_page, 3);
    assert_eq!(metadata.total_records, 45);
    assert_eq!(page[0].amount, 21);

    let (last, _) =
        PlantseedRepo::get_all(&pool, &PlantseedListParams::default(), &filters(3, 20, "id"))
            .await
            .unwrap();
    assert_eq!(last.len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_all_sorts_descending_with_id_tiebreak(pool: PgPool) {
    let a = PlantseedRepo::insert(&pool, &new_plantseed("A", "F", 1, 5)).await.unwrap();
    let b = PlantseedRepo::insert(&pool, &new_plantseed("B", "F", 1, 9)).await.unwrap();
    let c = PlantseedRepo::insert(&pool, &new_plantseed("C", "F", 1, 5)).await.unwrap();

    let (rows, _) =
        PlantseedRepo::get_all(&pool, &PlantseedListParams::default(), &filters(1, 20, "-price"))
            .await
            .unwrap();

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.id, a.id, c.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_all_filters_by_full_text(pool: PgPool) {
    PlantseedRepo::insert(&pool, &new_plantseed("Red Rose", "Rosaceae", 1, 1)).await.unwrap();
    PlantseedRepo::insert(&pool, &new_plantseed("Tulip", "Liliaceae", 1, 1)).await.unwrap();
    PlantseedRepo::insert(&pool, &new_plantseed("White Rose", "Rosaceae", 1, 1)).await.unwrap();

    let params = PlantseedListParams {
        name: "rose".to_string(),
        ..Default::default()
    };
    let (rows, metadata) = PlantseedRepo::get_all(&pool, &params, &filters(1, 20, "id"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(metadata.total_records, 2);

    let params = PlantseedListParams {
        family: "liliaceae".to_string(),
        ..Default::default()
    };
    let (rows, _) = PlantseedRepo::get_all(&pool, &params, &filters(1, 20, "id"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Tulip");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_all_with_no_matches_returns_empty_metadata(pool: PgPool) {
    let params = PlantseedListParams {
        name: "orchid".to_string(),
        ..Default::default()
    };
    let (rows, metadata) = PlantseedRepo::get_all(&pool, &params, &filters(1, 20, "id"))
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(metadata, Default::default());
}
