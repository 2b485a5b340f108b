//! Integration tests for user, token and permission repositories.
//!
//! `sqlx::test` provisions a fresh database per test from `DATABASE_URL`.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use plantseed_core::permissions::{PLANTSEED_READ, PLANTSEED_WRITE};
use plantseed_core::users::TokenScope;
use plantseed_db::models::token::CreateToken;
use plantseed_db::models::user::{CreateUser, User};
use plantseed_db::repositories::user_repo::EMAIL_UNIQUE_INDEX;
use plantseed_db::repositories::{PermissionRepo, TokenRepo, UserRepo};
use plantseed_db::DbError;
use sqlx::PgPool;

async fn create_user(pool: &PgPool, email: &str) -> User {
    let input = CreateUser {
        name: "Alice".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        activated: false,
    };
    UserRepo::insert(pool, &input).await.unwrap()
}

async fn store_token(pool: &PgPool, user_id: i64, hash: &str, scope: TokenScope, ttl: Duration) {
    let input = CreateToken {
        hash: hash.to_string(),
        user_id,
        expiry: Utc::now() + ttl,
        scope,
    };
    TokenRepo::insert(pool, &input).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_unique_violation(pool: PgPool) {
    create_user(&pool, "alice@example.com").await;

    let input = CreateUser {
        name: "Other".to_string(),
        email: "ALICE@example.com".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        activated: false,
    };
    let err = UserRepo::insert(&pool, &input).await.unwrap_err();
    assert!(err.is_unique_violation(EMAIL_UNIQUE_INDEX), "got {err:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_lookup_ignores_case(pool: PgPool) {
    let user = create_user(&pool, "Bob@Example.com").await;
    let found = UserRepo::get_by_email(&pool, "bob@example.com").await.unwrap();
    assert_eq!(found.id, user.id);

    assert_matches!(
        UserRepo::get_by_email(&pool, "nobody@example.com").await,
        Err(DbError::RecordNotFound)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_lookup_respects_scope_and_expiry(pool: PgPool) {
    let user = create_user(&pool, "carol@example.com").await;
    store_token(&pool, user.id, "live", TokenScope::Activation, Duration::hours(1)).await;
    store_token(&pool, user.id, "stale", TokenScope::Activation, Duration::hours(-1)).await;

    let found = UserRepo::get_for_token(&pool, TokenScope::Activation, "live")
        .await
        .unwrap();
    assert_eq!(found.id, user.id);

    assert_matches!(
        UserRepo::get_for_token(&pool, TokenScope::Authentication, "live").await,
        Err(DbError::RecordNotFound)
    );
    assert_matches!(
        UserRepo::get_for_token(&pool, TokenScope::Activation, "stale").await,
        Err(DbError::RecordNotFound)
    );

    assert_eq!(TokenRepo::delete_expired(&pool).await.unwrap(), 1);
    assert_eq!(
        TokenRepo::delete_all_for_user(&pool, TokenScope::Activation, user.id)
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activation_update_checks_version(pool: PgPool) {
    let mut user = create_user(&pool, "dave@example.com").await;
    let mut stale = user.clone();

    user.activated = true;
    UserRepo::update(&pool, &mut user).await.unwrap();
    assert_eq!(user.version, 2);

    stale.name = "Changed".to_string();
    assert_matches!(UserRepo::update(&pool, &mut stale).await, Err(DbError::EditConflict));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn permissions_are_granted_per_user(pool: PgPool) {
    let user = create_user(&pool, "erin@example.com").await;
    assert!(PermissionRepo::get_all_for_user(&pool, user.id)
        .await
        .unwrap()
        .is_empty());

    PermissionRepo::add_for_user(&pool, user.id, &[PLANTSEED_READ]).await.unwrap();
    // Granting twice is a no-op.
    PermissionRepo::add_for_user(&pool, user.id, &[PLANTSEED_READ]).await.unwrap();

    let perms = PermissionRepo::get_all_for_user(&pool, user.id).await.unwrap();
    assert!(perms.includes(PLANTSEED_READ));
    assert!(!perms.includes(PLANTSEED_WRITE));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn registration_writes_roll_back_together(pool: PgPool) {
    let input = CreateUser {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        activated: false,
    };

    let mut tx = pool.begin().await.unwrap();
    let user = UserRepo::insert(&mut *tx, &input).await.unwrap();
    PermissionRepo::add_for_user(&mut *tx, user.id, &[PLANTSEED_READ])
        .await
        .unwrap();
    let token = CreateToken {
        hash: "pending".to_string(),
        user_id: user.id,
        expiry: Utc::now() + Duration::hours(1),
        scope: TokenScope::Activation,
    };
    TokenRepo::insert(&mut *tx, &token).await.unwrap();
    tx.rollback().await.unwrap();

    assert_matches!(
        UserRepo::get_by_email(&pool, "alice@example.com").await,
        Err(DbError::RecordNotFound)
    );
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tokens")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    // The same email is free again.
    create_user(&pool, "alice@example.com").await;
}
