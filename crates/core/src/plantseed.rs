//! Plantseed field rules and list defaults.

use crate::validator::Validator;

/// Maximum length, in bytes, of `name` and `family`.
pub const MAX_TEXT_BYTES: usize = 500;

/// Sort tokens accepted by `GET /v1/plantseed`.
pub const SORT_SAFELIST: &[&str] = &[
    "id", "name", "family", "amount", "price", "-id", "-name", "-family", "-amount", "-price",
];

pub const DEFAULT_SORT: &str = "id";
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Check a complete plantseed record.
///
/// Used both on create and on the merged record after a partial update.
pub fn validate_plantseed(v: &mut Validator, name: &str, family: &str, amount: i32, price: i32) {
    v.check(!name.is_empty(), "name", "must be provided");
    v.check(
        name.len() <= MAX_TEXT_BYTES,
        "name",
        "must not be more than 500 bytes long",
    );

    v.check(!family.is_empty(), "family", "must be provided");
    v.check(
        family.len() <= MAX_TEXT_BYTES,
        "family",
        "must not be more than 500 bytes long",
    );

    v.check(amount != 0, "amount", "must be provided");
    v.check(amount > 0, "amount", "must be greater than 0");

    v.check(price != 0, "price", "must be provided");
    v.check(price > 0, "price", "must be greater than 0");
}
