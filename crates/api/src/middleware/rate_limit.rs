//! Global request rate limiting.
//!
//! A single `governor` quota guards the whole API: up to `burst` requests
//! may arrive back to back, and capacity is replenished at `rps` requests per
//! second. A request arriving once the quota is spent is rejected immediately
//! with `429` rather than queued.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;

use crate::error::AppError;

/// Default refill rate (requests per second).
const DEFAULT_RPS: f64 = 2.0;
/// Default burst size.
const DEFAULT_BURST: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub rps: f64,
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rps: DEFAULT_RPS,
            burst: DEFAULT_BURST,
        }
    }
}

impl RateLimitConfig {
    /// Load limiter settings from environment variables.
    ///
    /// | Env Var           | Default |
    /// |-------------------|---------|
    /// | `LIMITER_ENABLED` | `true`  |
    /// | `LIMITER_RPS`     | `2`     |
    /// | `LIMITER_BURST`   | `4`     |
    pub fn from_env() -> Self {
        let enabled: bool = std::env::var("LIMITER_ENABLED")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("LIMITER_ENABLED must be true or false");

        let rps: f64 = std::env::var("LIMITER_RPS")
            .unwrap_or_else(|_| DEFAULT_RPS.to_string())
            .parse()
            .expect("LIMITER_RPS must be a number");
        assert!(rps > 0.0, "LIMITER_RPS must be positive");

        let burst: u32 = std::env::var("LIMITER_BURST")
            .unwrap_or_else(|_| DEFAULT_BURST.to_string())
            .parse()
            .expect("LIMITER_BURST must be a valid u32");

        Self { enabled, rps, burst }
    }
}

type GlobalRateLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Process-wide limiter shared by every request.
///
/// Holds no quota at all when limiting is disabled.
pub struct RateLimiter {
    inner: Option<GlobalRateLimiter>,
}

impl RateLimiter {
    /// Create a limiter with its full burst available.
    pub fn new(config: RateLimitConfig) -> Self {
        let inner = config
            .enabled
            .then(|| GlobalRateLimiter::direct(quota(&config)));
        Self { inner }
    }

    /// Consume one unit of the quota if any is left.
    pub fn allow(&self) -> bool {
        match &self.inner {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }
}

/// Translate `rps`/`burst` into a governor quota.
///
/// A zero burst is raised to one; an unrepresentable period falls back to
/// the fastest quota governor supports.
fn quota(config: &RateLimitConfig) -> Quota {
    let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);
    let period = Duration::try_from_secs_f64(config.rps.recip()).unwrap_or(Duration::ZERO);
    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX))
        .allow_burst(burst)
}

/// Middleware rejecting requests once the shared quota is spent.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if !limiter.allow() {
        tracing::warn!(method = %request.method(), uri = %request.uri(), "Rate limit exceeded");
        return AppError::RateLimitExceeded.into_response();
    }
    next.run(request).await
}
