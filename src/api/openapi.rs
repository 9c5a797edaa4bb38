//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{
    catalog_handler, explore_handler, leaderboard_handler, review_handler, user_handler,
};
use crate::domain::{Destination, Review, User, UserSummary, Visit};
use crate::services::LeaderboardEntry;
use crate::types::StatusResponse;

/// OpenAPI documentation for the exploration API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zyscope Exploration API",
        version = "0.1.0",
        description = "Gamified travel-exploration backend with Axum, SeaORM, and SQLite",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Catalog
        catalog_handler::list_destinations,
        catalog_handler::compare,
        // Accounts
        user_handler::login,
        user_handler::update_profile,
        user_handler::delete_account,
        user_handler::logout,
        // Exploration
        explore_handler::explore,
        explore_handler::list_visits,
        leaderboard_handler::leaderboard,
        // Reviews
        review_handler::create_review,
        review_handler::list_reviews,
        review_handler::recent_reviews,
        // Progression
        user_handler::minigame_xp,
        user_handler::add_xp,
    ),
    components(
        schemas(
            // Domain types
            User,
            UserSummary,
            Visit,
            Review,
            Destination,
            LeaderboardEntry,
            StatusResponse,
            // Request types
            user_handler::LoginRequest,
            user_handler::UpdateProfileRequest,
            user_handler::DeleteAccountRequest,
            user_handler::XpGrantRequest,
            explore_handler::ExploreRequest,
            review_handler::CreateReviewRequest,
            catalog_handler::CompareRequest,
            // Response types
            user_handler::XpGrantResponse,
            explore_handler::ExploreResponse,
            explore_handler::VisitWithCity,
            explore_handler::VisitsResponse,
            review_handler::ReviewResponse,
            review_handler::LocationReviewsResponse,
            review_handler::RecentReview,
            review_handler::RecentReviewsResponse,
            leaderboard_handler::LeaderboardResponse,
            catalog_handler::CompareResponse,
        )
    ),
    tags(
        (name = "Catalog", description = "Static destination catalog"),
        (name = "Users", description = "Guest login and account management"),
        (name = "Exploration", description = "Visits, XP, and the leaderboard"),
        (name = "Reviews", description = "Destination reviews"),
        (name = "Progression", description = "External XP grants")
    )
)]
pub struct ApiDoc;
