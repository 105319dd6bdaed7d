use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{
    DeleteUserDto, PaginatedProfilesResponse, Profile, ProfileFilterParams, SetApprovalDto,
    UpdateProfileDto,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

// The navigation guard has already verified the superadmin role for
// everything under /users; handlers here only do the work.

#[utoipa::path(
    get,
    path = "/users",
    params(
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("is_approved" = Option<bool>, Query, description = "Filter by approval status"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "List of profiles", body = PaginatedProfilesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<ProfileFilterParams>,
) -> Result<Json<PaginatedProfilesResponse>, AppError> {
    let (profiles, total) = UserService::list_profiles(&state.db, &params).await?;

    Ok(Json(PaginatedProfilesResponse {
        meta: params.pagination.meta(total),
        data: profiles,
    }))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile details", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let profile = UserService::get_profile(&state.db, id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<Profile>, AppError> {
    let profile = UserService::update_profile(&state.db, id, dto).await?;
    // The edited actor must not keep authorizing against a stale profile.
    state.sessions.invalidate(id).await;
    Ok(Json(profile))
}

#[utoipa::path(
    patch,
    path = "/users/{id}/approval",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body = SetApprovalDto,
    responses(
        (status = 200, description = "Approval updated", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn set_user_approval(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<SetApprovalDto>,
) -> Result<Json<Profile>, AppError> {
    let profile = UserService::set_approval(&state.db, id, dto.is_approved).await?;
    state.sessions.invalidate(id).await;
    Ok(Json(profile))
}

/// Privileged deletion endpoint. Fails closed with 400 when no target id is
/// supplied.
#[utoipa::path(
    post,
    path = "/users/delete",
    request_body = DeleteUserDto,
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "No user id supplied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Json(dto): Json<DeleteUserDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = dto
        .id
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("User ID is required")))?;

    UserService::delete_user(&state.db, id).await?;
    state.sessions.remove(id).await;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
