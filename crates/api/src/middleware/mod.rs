//! Request guards and middleware.
//!
//! - [`auth::Principal`] -- Resolves the caller from an optional Bearer token.
//! - [`permission::RequirePermission`] -- Requires an activated user holding a
//!   permission code.
//! - [`rate_limit::rate_limit`] -- Global `governor` rate limiting.

pub mod auth;
pub mod permission;
pub mod rate_limit;
