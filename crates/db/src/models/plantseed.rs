//! Plantseed entity model and DTOs.

use plantseed_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `plantseed` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Plantseed {
    pub id: DbId,
    pub created_at: Timestamp,
    pub name: String,
    pub family: String,
    pub amount: i32,
    pub price: i32,
    /// Incremented on every update; used for optimistic concurrency.
    pub version: i32,
}

/// DTO for creating a plantseed.
///
/// Missing fields deserialize to empty/zero so they are reported by
/// validation rather than rejected as malformed JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreatePlantseed {
    pub name: String,
    pub family: String,
    pub amount: i32,
    pub price: i32,
}

/// DTO for `PATCH /v1/plantseed/{id}`. Absent (or null) fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchPlantseed {
    pub name: Option<String>,
    pub family: Option<String>,
    pub amount: Option<i32>,
    pub price: Option<i32>,
}

impl PatchPlantseed {
    /// Overwrite the fields of `record` that this patch provides.
    pub fn apply_to(self, record: &mut Plantseed) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(family) = self.family {
            record.family = family;
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
    }
}

/// Free-text and numeric list filters accepted by `GET /v1/plantseed`.
#[derive(Debug, Clone, Default)]
pub struct PlantseedListParams {
    /// Full-text match on `name`; empty matches everything.
    pub name: String,
    /// Full-text match on `family`; empty matches everything.
    pub family: String,
    /// Parsed and validated for compatibility with existing clients but not
    /// applied to the query.
    pub amount: i64,
    /// See `amount`.
    pub price: i64,
}
