//! Review handlers: creating reviews and reading them back.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Destination, Review, UserSummary};
use crate::errors::{AppError, AppResult};

/// Request to review a destination
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub user_id: i64,
    /// Destination name; must exist in the catalog
    #[validate(length(min = 1, message = "location must not be empty"))]
    #[schema(example = "Japan")]
    pub location: String,
    /// Rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    #[schema(example = 4)]
    pub rating: i32,
    pub comment: Option<String>,
}

/// A stored review with its author and destination context
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub user: UserSummary,
    pub city: Destination,
    pub review: Review,
}

/// Review list query
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewsQuery {
    /// Destination name
    pub location: String,
}

/// Reviews for one destination, newest first
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationReviewsResponse {
    pub city: Destination,
    pub reviews: Vec<Review>,
}

/// Recent review list query
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentReviewsQuery {
    /// Maximum entries; defaults to 10, capped at 100
    pub limit: Option<i64>,
}

/// A recent review enriched with its author and catalog entry
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentReview {
    #[serde(flatten)]
    pub review: Review,
    pub user: Option<UserSummary>,
    pub city: Option<Destination>,
}

/// Most recent reviews across all destinations
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentReviewsResponse {
    pub reviews: Vec<RecentReview>,
}

/// Create review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review).get(list_reviews))
        .route("/recent", get(recent_reviews))
}

/// Review a destination; reviews grant no XP
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review stored", body = ReviewResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User or destination not found")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let city = state
        .catalog
        .find_by_name(&payload.location)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let user = state
        .user_service
        .get_user(payload.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let review = state
        .exploration_service
        .record_review(user.id, &city.name, payload.rating, payload.comment)
        .await?;

    Ok(Json(ReviewResponse {
        user: UserSummary::from(&user),
        city,
        review,
    }))
}

/// Reviews for one destination, newest first
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    params(ReviewsQuery),
    responses(
        (status = 200, description = "Reviews for the destination", body = LocationReviewsResponse),
        (status = 404, description = "Destination not found")
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> AppResult<Json<LocationReviewsResponse>> {
    let city = state
        .catalog
        .find_by_name(&query.location)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let reviews = state
        .exploration_service
        .reviews_for_location(&city.name)
        .await?;

    Ok(Json(LocationReviewsResponse { city, reviews }))
}

/// Most recent reviews across all destinations
#[utoipa::path(
    get,
    path = "/reviews/recent",
    tag = "Reviews",
    params(RecentReviewsQuery),
    responses((status = 200, description = "Recent reviews", body = RecentReviewsResponse))
)]
pub async fn recent_reviews(
    State(state): State<AppState>,
    Query(query): Query<RecentReviewsQuery>,
) -> AppResult<Json<RecentReviewsResponse>> {
    let mut reviews = Vec::new();
    for review in state.exploration_service.recent_reviews(query.limit).await? {
        let user = state
            .user_service
            .get_user(review.user_id)
            .await?
            .map(|u| UserSummary::from(&u));
        let city = state.catalog.find_by_name(&review.location).cloned();
        reviews.push(RecentReview { review, user, city });
    }

    Ok(Json(RecentReviewsResponse { reviews }))
}
