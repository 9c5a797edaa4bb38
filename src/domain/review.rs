//! Review domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user's rating and optional comment on a location.
///
/// Ratings are constrained to 1..=5 at both the API boundary and the
/// store (CHECK constraint). Reviews are append-only and cascade-deleted
/// with their owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub location: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
