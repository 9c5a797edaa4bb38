//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity: identity plus progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Derived from points, minimum 1
    pub level: i32,
    /// Accumulated XP, never negative
    pub points: i64,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
}

/// Profile fields replaced together by a profile update.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub username: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
}

/// Compact user shape embedded in visit/review responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
