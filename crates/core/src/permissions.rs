//! Well-known permission codes.
//!
//! These must match the seed data in `20261017000004_create_permissions_tables.sql`.

pub const PLANTSEED_READ: &str = "plantseed:read";
pub const PLANTSEED_WRITE: &str = "plantseed:write";

/// Permissions granted to every newly registered user.
pub const DEFAULT_USER_PERMISSIONS: &[&str] = &[PLANTSEED_READ];

/// The permission codes held by a principal.
///
/// Anonymous principals hold the empty set ([`Permissions::default`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions(Vec<String>);

impl Permissions {
    pub fn includes(&self, code: &str) -> bool {
        self.0.iter().any(|p| p == code)
    }
}

impl From<Vec<String>> for Permissions {
    fn from(codes: Vec<String>) -> Self {
        Self(codes)
    }
}
