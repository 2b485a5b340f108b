use std::time::Duration;

use plantseed_db::PoolSettings;

use crate::mailer::EmailConfig;
use crate::middleware::rate_limit::RateLimitConfig;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields except `database_url` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Deployment environment reported by the healthcheck
    /// (`development`, `staging` or `production`).
    pub environment: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background work during shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL connection string.
    pub database_url: String,
    pub pool: PoolSettings,
    pub limiter: RateLimitConfig,
    /// `None` when SMTP is not configured; emails are then only logged.
    pub smtp: Option<EmailConfig>,
    pub log_format: LogFormat,
}

const ENVIRONMENTS: &[&str] = &["development", "staging", "production"];

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4000`                     |
    /// | `ENV`                  | `development`              |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATABASE_URL`         | **required**               |
    /// | `DB_MAX_CONNECTIONS`   | `25`                       |
    /// | `DB_IDLE_TIMEOUT_SECS` | `900`                      |
    /// | `LOG_FORMAT`           | `pretty` (or `json`)       |
    ///
    /// Rate limiter and SMTP settings are documented on
    /// [`RateLimitConfig::from_env`] and [`EmailConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on missing `DATABASE_URL` or malformed values; misconfiguration
    /// should stop the process at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = std::env::var("ENV").unwrap_or_else(|_| "development".into());
        assert!(
            ENVIRONMENTS.contains(&environment.as_str()),
            "ENV must be one of {ENVIRONMENTS:?}"
        );

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
                .unwrap_or(defaults.max_connections),
            idle_timeout: std::env::var("DB_IDLE_TIMEOUT_SECS")
                .map(|v| {
                    Duration::from_secs(v.parse().expect("DB_IDLE_TIMEOUT_SECS must be a valid u64"))
                })
                .unwrap_or(defaults.idle_timeout),
        };

        let log_format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            pool,
            limiter: RateLimitConfig::from_env(),
            smtp: EmailConfig::from_env(),
            log_format,
        }
    }
}
