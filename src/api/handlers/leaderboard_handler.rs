//! Leaderboard handler.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::LeaderboardEntry;

/// Leaderboard query
#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Maximum entries; defaults to 10, capped at 100
    pub limit: Option<i64>,
}

/// Top users with their activity aggregates
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub users: Vec<LeaderboardEntry>,
}

/// Top users by points, level, then seniority
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Exploration",
    params(LeaderboardQuery),
    responses((status = 200, description = "Leaderboard", body = LeaderboardResponse))
)]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<LeaderboardResponse>> {
    let users = state.exploration_service.leaderboard(query.limit).await?;
    Ok(Json(LeaderboardResponse { users }))
}
