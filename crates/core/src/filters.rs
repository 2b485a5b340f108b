//! Pagination and sorting for list endpoints.
//!
//! [`Filters`] is built per request from query parameters and checked with
//! [`validate_filters`] before it reaches the repository layer. The sort
//! column is only ever taken from the safelist, so it can be interpolated
//! into `ORDER BY` without opening an injection hole.

use serde::Serialize;

use crate::error::CoreError;
use crate::validator::{permitted_value, Validator};

/// Highest page number a client may request.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Requested sort token, e.g. `"name"` or `"-price"`.
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

impl Filters {
    /// The bare column name for the requested sort, with any leading `-`
    /// removed.
    ///
    /// Fails if the token is not in the safelist.
    pub fn sort_column(&self) -> Result<&str, CoreError> {
        if !self.sort_safelist.contains(&self.sort.as_str()) {
            return Err(CoreError::UnsafeSort(self.sort.clone()));
        }
        Ok(self.sort.trim_start_matches('-'))
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Record validation errors for out-of-range paging or an unknown sort.
pub fn validate_filters(v: &mut Validator, f: &Filters) {
    v.check(f.page > 0, "page", "must be greater than zero");
    v.check(f.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
    v.check(f.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        f.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted_value(&f.sort.as_str(), f.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

/// Pagination summary returned alongside a page of results.
///
/// An empty result set produces all-zero metadata, which serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "is_zero")]
    pub current_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub first_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub last_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}
