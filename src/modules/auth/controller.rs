use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{
    ApprovalStatusResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto,
};
use super::service::AuthService;
use crate::middleware::auth::{Actor, AuthUser};
use crate::modules::users::model::Profile;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account (pending approval)
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account registered, awaiting approval", body = Profile),
        (status = 400, description = "Bad request - validation error or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let profile = AuthService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Login and receive an access token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Logout: tear down the server-side session state
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user))]
pub async fn logout_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    let identity = auth_user.identity_id()?;
    // Cleared before the response: a subsequent login by another actor must
    // never observe this session's cached profile.
    state.sessions.remove(identity).await;
    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

/// Current actor's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The authenticated profile", body = Profile),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(actor))]
pub async fn get_me(actor: Actor) -> Json<Profile> {
    Json(actor.0)
}

/// Approval-gate page for actors waiting on an admin
#[utoipa::path(
    get,
    path = "/auth/pending-approval",
    responses(
        (status = 200, description = "Approval status", body = ApprovalStatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(actor))]
pub async fn pending_approval(actor: Actor) -> Json<ApprovalStatusResponse> {
    let profile = actor.0;
    let message = if profile.is_approved {
        "Your account is approved.".to_string()
    } else {
        "Your account is awaiting administrator approval.".to_string()
    };
    Json(ApprovalStatusResponse {
        full_name: profile.full_name,
        is_approved: profile.is_approved,
        message,
    })
}
