//! Pure domain logic for the plantseed service.
//!
//! Nothing in this crate performs I/O: field validation, pagination and
//! sorting rules, permission codes, and the shared id/timestamp aliases live
//! here so the db and api crates can share them.

pub mod error;
pub mod filters;
pub mod permissions;
pub mod plantseed;
pub mod types;
pub mod users;
pub mod validator;
