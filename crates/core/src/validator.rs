//! Field-error accumulator used by every request that accepts input.
//!
//! A [`Validator`] is created per request, fed a series of checks, and then
//! either discarded (valid) or turned into a `422` response body (invalid).
//! Only the first message recorded for a key is kept, so checks should be
//! ordered from most to least fundamental ("must be provided" before
//! "must not be more than 500 bytes long").

use std::collections::BTreeMap;

use validator::ValidateEmail;

/// Field name -> human-readable message.
///
/// A `BTreeMap` keeps JSON output ordered, which makes error bodies stable.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Default, Clone)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no errors have been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` under `key` unless the key already has a message.
    pub fn add_error(&mut self, key: &str, message: &str) {
        self.errors
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record `message` under `key` if `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, returning the accumulated errors if any.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// `true` if `value` appears in `list`.
pub fn permitted_value<T: PartialEq>(value: &T, list: &[T]) -> bool {
    list.contains(value)
}

/// `true` if `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    value.validate_email()
}
