//! Query-string helpers for list endpoints.
//!
//! Handlers take `Query<HashMap<String, String>>` and read each parameter
//! with a default, so a malformed value becomes a field error in the
//! request's [`Validator`] instead of a bare extractor rejection.

use std::collections::HashMap;

use plantseed_core::validator::Validator;

pub type QueryParams = HashMap<String, String>;

/// The value of `key`, or `default` when absent or empty.
pub fn read_string(qs: &QueryParams, key: &str, default: &str) -> String {
    match qs.get(key) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => default.to_string(),
    }
}

/// The integer value of `key`, or `default` when absent or empty.
///
/// A value that does not parse records `"must be an integer value"` under
/// `key` and yields `default`.
pub fn read_int(qs: &QueryParams, key: &str, default: i64, v: &mut Validator) -> i64 {
    match qs.get(key) {
        Some(value) if !value.is_empty() => value.parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
        _ => default,
    }
}
