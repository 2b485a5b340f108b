//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every query runs under
//! [`crate::QUERY_TIMEOUT`].

pub mod permission_repo;
pub mod plantseed_repo;
pub mod token_repo;
pub mod user_repo;

pub use permission_repo::PermissionRepo;
pub use plantseed_repo::PlantseedRepo;
pub use token_repo::TokenRepo;
pub use user_repo::UserRepo;
