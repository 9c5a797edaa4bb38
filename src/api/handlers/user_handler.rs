//! User account handlers: guest login, profile, deletion, XP grants.

use axum::{
    extract::State,
    response::Json,
    routing::{delete, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{LevelMode, UpdateProfile, User};
use crate::errors::{AppError, AppResult};
use crate::types::StatusResponse;

/// Guest login request; a missing or blank username creates a guest account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username to log in as; omit to get a generated guest account
    #[schema(example = "wanderer")]
    pub username: Option<String>,
}

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// Account to update
    pub user_id: i64,
    /// New username
    #[validate(length(min = 1, message = "username must not be empty"))]
    #[schema(example = "wanderer")]
    pub username: String,
    /// Contact email
    pub email: Option<String>,
    /// Short biography
    pub bio: Option<String>,
    /// Profile picture (URL or data URI)
    #[serde(alias = "profilePic", alias = "avatar")]
    pub profile_pic: Option<String>,
}

/// Account deletion request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteAccountRequest {
    pub user_id: i64,
}

/// External XP grant request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct XpGrantRequest {
    #[serde(alias = "userId")]
    pub user_id: i64,
    /// XP amount, never negative
    #[validate(range(min = 0, message = "xp must not be negative"))]
    pub xp: i64,
}

/// External XP grant acknowledgement; field names match the game clients
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct XpGrantResponse {
    pub success: bool,
    pub xp_awarded: i64,
    pub total_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
}

/// Create user account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/update", put(update_profile))
        .route("/delete", delete(delete_account))
        .route("/logout", post(logout))
}

/// Guest login: create the user, or return the existing one
#[utoipa::path(
    post,
    path = "/user/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = User),
        (status = 400, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = state.user_service.login_or_create(payload.username).await?;
    Ok(Json(user))
}

/// Update username and profile fields
#[utoipa::path(
    put,
    path = "/user/update",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<User>> {
    let profile = UpdateProfile {
        username: payload.username,
        email: payload.email,
        bio: payload.bio,
        profile_pic: payload.profile_pic,
    };
    let user = state
        .user_service
        .update_profile(payload.user_id, profile)
        .await?;
    Ok(Json(user))
}

/// Delete an account; visits and reviews are removed by cascade
#[utoipa::path(
    delete,
    path = "/user/delete",
    tag = "Users",
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "User deleted", body = StatusResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteAccountRequest>,
) -> AppResult<Json<StatusResponse>> {
    // The service delete is idempotent; the HTTP surface reports 404 for
    // an unknown account
    state
        .user_service
        .get_user(payload.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    state.user_service.delete_user(payload.user_id).await?;
    Ok(Json(StatusResponse::ok("User deleted")))
}

/// Stateless logout acknowledgement
#[utoipa::path(
    post,
    path = "/user/logout",
    tag = "Users",
    responses((status = 200, description = "Logged out", body = StatusResponse))
)]
pub async fn logout() -> Json<StatusResponse> {
    Json(StatusResponse::ok("Logged out"))
}

/// Grant bonus XP from the mini-game; the stored level is preserved
#[utoipa::path(
    post,
    path = "/minigame/xp",
    tag = "Progression",
    request_body = XpGrantRequest,
    responses(
        (status = 200, description = "XP granted", body = XpGrantResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn minigame_xp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<XpGrantRequest>,
) -> AppResult<Json<XpGrantResponse>> {
    let user = state
        .user_service
        .add_external_xp(payload.user_id, payload.xp, LevelMode::Preserve)
        .await?;

    Ok(Json(XpGrantResponse {
        success: true,
        xp_awarded: payload.xp,
        total_points: user.points,
        level: None,
    }))
}

/// Grant XP and recompute the level from the new total
#[utoipa::path(
    post,
    path = "/xp/add",
    tag = "Progression",
    request_body = XpGrantRequest,
    responses(
        (status = 200, description = "XP granted", body = XpGrantResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn add_xp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<XpGrantRequest>,
) -> AppResult<Json<XpGrantResponse>> {
    let user = state
        .user_service
        .add_external_xp(payload.user_id, payload.xp, LevelMode::Recompute)
        .await?;

    Ok(Json(XpGrantResponse {
        success: true,
        xp_awarded: payload.xp,
        total_points: user.points,
        level: Some(user.level),
    }))
}
