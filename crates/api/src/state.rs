use std::sync::Arc;

use tokio_util::task::TaskTracker;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: plantseed_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Global quota consulted by the rate-limit middleware.
    pub rate_limiter: Arc<RateLimiter>,
    pub mailer: Arc<dyn Mailer>,
    /// Tracks fire-and-forget work (welcome emails) so shutdown can wait for it.
    pub background: TaskTracker,
}
