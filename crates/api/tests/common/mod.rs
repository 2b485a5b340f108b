#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio_util::task::TaskTracker;
use tower::ServiceExt;

use plantseed_api::config::{LogFormat, ServerConfig};
use plantseed_api::mailer::{Mailer, MailerError, WelcomeEmail};
use plantseed_api::middleware::rate_limit::{RateLimitConfig, RateLimiter};
use plantseed_api::router::build_app_router;
use plantseed_api::state::AppState;
use plantseed_db::PoolSettings;

/// Build a test `ServerConfig` with safe defaults and the limiter disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "development".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        pool: PoolSettings::default(),
        limiter: RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        },
        smtp: None,
        log_format: LogFormat::Pretty,
    }
}

/// A pool pointing at a closed port. Any query fails after a short wait, so
/// a test passing with it proves the request never reached the store.
pub fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://postgres@127.0.0.1:1/plantseed")
        .expect("lazy pool should build")
}

/// Captures welcome emails instead of sending them.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<WelcomeEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Everything a test needs to drive the app and inspect side effects.
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub background: TaskTracker,
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    let background = TaskTracker::new();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter: Arc::new(RateLimiter::new(config.limiter)),
        mailer: mailer.clone(),
        background: background.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        mailer,
        background,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, test_config())
}

impl TestApp {
    /// Wait for spawned background work (welcome emails) to finish.
    pub async fn drain_background(&self) {
        self.background.close();
        self.background.wait().await;
        self.background.reopen();
    }

    pub fn sent_emails(&self) -> Vec<WelcomeEmail> {
        self.mailer.sent.lock().unwrap().clone()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::PUT, uri, None, Some(body))).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "pa55word!";

/// Insert a user directly, grant `permissions`, and return the user with a
/// live authentication token.
pub async fn create_user_with_token(
    pool: &PgPool,
    email: &str,
    activated: bool,
    permissions: &[&str],
) -> (plantseed_db::models::user::User, String) {
    use plantseed_api::auth::password::hash_password;
    use plantseed_api::auth::token::issue_token;
    use plantseed_core::users::TokenScope;
    use plantseed_db::models::user::CreateUser;
    use plantseed_db::repositories::{PermissionRepo, UserRepo};

    let user = UserRepo::insert(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            activated,
        },
    )
    .await
    .expect("user creation should succeed");

    PermissionRepo::add_for_user(pool, user.id, permissions)
        .await
        .expect("granting permissions should succeed");

    let token = issue_token(
        pool,
        user.id,
        chrono::Duration::hours(1),
        TokenScope::Authentication,
    )
    .await
    .expect("token issue should succeed");

    (user, token.token)
}
