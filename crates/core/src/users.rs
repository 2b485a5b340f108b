//! User account and token rules.

use std::fmt;

use crate::validator::{is_valid_email, Validator};

pub const MAX_NAME_BYTES: usize = 500;
pub const PASSWORD_MIN_BYTES: usize = 8;
/// Argon2 itself has no practical limit; the cap keeps hashing cost bounded.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Length of every plaintext token handed to clients.
pub const TOKEN_PLAINTEXT_LEN: usize = 26;

/// Activation tokens are emailed and may sit unread for a while.
pub const ACTIVATION_TOKEN_TTL_HOURS: i64 = 3 * 24;
pub const AUTHENTICATION_TOKEN_TTL_HOURS: i64 = 24;

/// What a stored token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    Activation,
    Authentication,
}

impl TokenScope {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenScope::Activation => "activation",
            TokenScope::Authentication => "authentication",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(is_valid_email(email), "email", "must be a valid email address");
}

pub fn validate_password_plaintext(v: &mut Validator, password: &str) {
    v.check(!password.is_empty(), "password", "must be provided");
    v.check(
        password.len() >= PASSWORD_MIN_BYTES,
        "password",
        "must be at least 8 bytes long",
    );
    v.check(
        password.len() <= PASSWORD_MAX_BYTES,
        "password",
        "must not be more than 72 bytes long",
    );
}

/// Check a registration payload.
pub fn validate_user(v: &mut Validator, name: &str, email: &str, password: &str) {
    v.check(!name.is_empty(), "name", "must be provided");
    v.check(
        name.len() <= MAX_NAME_BYTES,
        "name",
        "must not be more than 500 bytes long",
    );
    validate_email(v, email);
    validate_password_plaintext(v, password);
}

pub fn validate_token_plaintext(v: &mut Validator, token: &str) {
    v.check(!token.is_empty(), "token", "must be provided");
    v.check(
        token.len() == TOKEN_PLAINTEXT_LEN,
        "token",
        "must be 26 bytes long",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_registration() {
        let mut v = Validator::new();
        validate_user(&mut v, "Alice", "alice@example.com", "pa55word!");
        assert!(v.valid(), "unexpected errors: {:?}", v.errors());
    }

    #[test]
    fn registration_reports_each_field() {
        let mut v = Validator::new();
        validate_user(&mut v, "", "not-an-email", "short");
        assert_eq!(v.errors()["name"], "must be provided");
        assert_eq!(v.errors()["email"], "must be a valid email address");
        assert_eq!(v.errors()["password"], "must be at least 8 bytes long");
    }

    #[test]
    fn empty_email_reports_missing_first() {
        let mut v = Validator::new();
        validate_email(&mut v, "");
        assert_eq!(v.errors()["email"], "must be provided");
    }

    #[test]
    fn password_upper_bound() {
        let mut v = Validator::new();
        validate_password_plaintext(&mut v, &"p".repeat(PASSWORD_MAX_BYTES + 1));
        assert_eq!(v.errors()["password"], "must not be more than 72 bytes long");

        let mut v = Validator::new();
        validate_password_plaintext(&mut v, &"p".repeat(PASSWORD_MAX_BYTES));
        assert!(v.valid());
    }

    #[test]
    fn token_length_must_match() {
        let mut v = Validator::new();
        validate_token_plaintext(&mut v, "abc");
        assert_eq!(v.errors()["token"], "must be 26 bytes long");

        let mut v = Validator::new();
        validate_token_plaintext(&mut v, &"A".repeat(TOKEN_PLAINTEXT_LEN));
        assert!(v.valid());
    }

    #[test]
    fn scope_names() {
        assert_eq!(TokenScope::Activation.as_str(), "activation");
        assert_eq!(TokenScope::Authentication.to_string(), "authentication");
    }
}
