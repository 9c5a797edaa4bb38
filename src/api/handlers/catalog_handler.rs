//! Catalog handlers: destination listing and side-by-side comparison.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Destination;
use crate::errors::{AppError, AppResult};

/// Request to compare two destinations
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompareRequest {
    #[validate(length(min = 1, message = "city1 is required"))]
    #[schema(example = "Japan")]
    pub city1: String,
    #[validate(length(min = 1, message = "city2 is required"))]
    #[schema(example = "Norway")]
    pub city2: String,
}

/// Two destinations side by side
#[derive(Debug, Serialize, ToSchema)]
pub struct CompareResponse {
    pub city1: Destination,
    pub city2: Destination,
}

/// Full destination catalog
#[utoipa::path(
    get,
    path = "/destinations",
    tag = "Catalog",
    responses((status = 200, description = "All destinations", body = [Destination]))
)]
pub async fn list_destinations(State(state): State<AppState>) -> Json<Vec<Destination>> {
    Json(state.catalog.all().to_vec())
}

/// Compare the travel-profile scores of two destinations
#[utoipa::path(
    post,
    path = "/compare",
    tag = "Catalog",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Comparison", body = CompareResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "One or both destinations not found")
    )
)]
pub async fn compare(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CompareRequest>,
) -> AppResult<Json<CompareResponse>> {
    let city1 = state
        .catalog
        .find_by_name(&payload.city1)
        .cloned()
        .ok_or(AppError::NotFound)?;
    let city2 = state
        .catalog
        .find_by_name(&payload.city2)
        .cloned()
        .ok_or(AppError::NotFound)?;

    Ok(Json(CompareResponse { city1, city2 }))
}
