//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- Random activation/authentication tokens and their hashes.

pub mod password;
pub mod token;
