use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantseed_api::config::{LogFormat, ServerConfig};
use plantseed_api::mailer::{LogMailer, Mailer, SmtpMailer};
use plantseed_api::middleware::rate_limit::RateLimiter;
use plantseed_api::router::build_app_router;
use plantseed_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "plantseed_api=debug,plantseed_db=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        environment = %config.environment,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = plantseed_db::create_pool(&config.database_url, &config.pool)
        .await
        .expect("Failed to connect to database");
    tracing::info!(
        max_connections = config.pool.max_connections,
        "Database connection pool created"
    );

    plantseed_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    plantseed_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Mailer ---
    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => {
            tracing::info!(smtp_host = %smtp.smtp_host, "SMTP mailer configured");
            Arc::new(SmtpMailer::new(smtp).expect("Invalid SMTP configuration"))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    // --- Background jobs ---
    let cleanup_cancel = CancellationToken::new();
    let cleanup_handle = tokio::spawn(plantseed_api::background::run_token_cleanup(
        pool.clone(),
        cleanup_cancel.clone(),
    ));

    // --- App state ---
    let background = TaskTracker::new();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        rate_limiter: Arc::new(RateLimiter::new(config.limiter)),
        mailer,
        background: background.clone(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    cleanup_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;
    tracing::info!("Token cleanup job stopped");

    background.close();
    tracing::info!(pending = background.len(), "Waiting for background tasks");
    if tokio::time::timeout(shutdown_timeout, background.wait())
        .await
        .is_err()
    {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Background tasks did not finish before the shutdown timeout"
        );
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
