//! Background jobs.
//!
//! Long-running loops spawned from `main`; each stops when its
//! [`CancellationToken`] is cancelled.

use std::time::Duration;

use plantseed_db::repositories::TokenRepo;
use plantseed_db::DbPool;
use tokio_util::sync::CancellationToken;

/// How often expired tokens are purged.
const TOKEN_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Delete expired activation and authentication tokens once an hour until
/// `cancel` fires.
pub async fn run_token_cleanup(pool: DbPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = TOKEN_CLEANUP_INTERVAL.as_secs(),
        "Token cleanup job started"
    );

    let mut interval = tokio::time::interval(TOKEN_CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Token cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                match TokenRepo::delete_expired(&pool).await {
                    Ok(0) => tracing::debug!("Token cleanup: nothing to purge"),
                    Ok(deleted) => tracing::info!(deleted, "Token cleanup: purged expired tokens"),
                    Err(e) => tracing::error!(error = %e, "Token cleanup failed"),
                }
            }
        }
    }
}
