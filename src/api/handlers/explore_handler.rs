//! Visit handlers: exploring a destination and listing visits.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Destination, User, Visit};
use crate::errors::{AppError, AppResult};

/// Request to mark a destination as explored
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExploreRequest {
    pub user_id: i64,
    /// Destination name; must exist in the catalog
    #[validate(length(min = 1, message = "location must not be empty"))]
    #[schema(example = "Japan")]
    pub location: String,
}

/// Result of a recorded visit: updated progression, destination, visit row
#[derive(Debug, Serialize, ToSchema)]
pub struct ExploreResponse {
    pub user: User,
    pub city: Destination,
    pub visit: Visit,
}

/// Visit list query
#[derive(Debug, Deserialize, IntoParams)]
pub struct VisitsQuery {
    pub user_id: i64,
}

/// A stored visit enriched with its catalog entry, when still present
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitWithCity {
    #[serde(flatten)]
    pub visit: Visit,
    pub city: Option<Destination>,
}

/// A user's visit history, newest first
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitsResponse {
    pub user: User,
    pub visits: Vec<VisitWithCity>,
}

/// Record a visit and credit the visit XP
#[utoipa::path(
    post,
    path = "/explore",
    tag = "Exploration",
    request_body = ExploreRequest,
    responses(
        (status = 200, description = "Visit recorded", body = ExploreResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User or destination not found")
    )
)]
pub async fn explore(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ExploreRequest>,
) -> AppResult<Json<ExploreResponse>> {
    // Resolve to the canonical catalog name before anything is stored
    let city = state
        .catalog
        .find_by_name(&payload.location)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let (user, visit) = state
        .exploration_service
        .record_visit(payload.user_id, &city.name)
        .await?;

    Ok(Json(ExploreResponse { user, city, visit }))
}

/// List a user's visits, newest first
#[utoipa::path(
    get,
    path = "/visits",
    tag = "Exploration",
    params(VisitsQuery),
    responses(
        (status = 200, description = "Visit history", body = VisitsResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_visits(
    State(state): State<AppState>,
    Query(query): Query<VisitsQuery>,
) -> AppResult<Json<VisitsResponse>> {
    let user = state
        .user_service
        .get_user(query.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let visits = state
        .exploration_service
        .visits_for_user(query.user_id)
        .await?
        .into_iter()
        .map(|visit| {
            let city = state.catalog.find_by_name(&visit.location).cloned();
            VisitWithCity { visit, city }
        })
        .collect();

    Ok(Json(VisitsResponse { user, visits }))
}
