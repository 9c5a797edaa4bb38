//! Visit domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A record that a user marked a location as explored.
///
/// Visits are append-only: created by the explore action and removed only
/// when the owning user is deleted (cascade).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Visit {
    pub id: i64,
    pub user_id: i64,
    pub location: String,
    pub visited_at: DateTime<Utc>,
}
