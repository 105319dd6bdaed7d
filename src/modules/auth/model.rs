use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::authz::Role;
use crate::modules::users::model::Profile;
use crate::utils::errors::AppError;

/// JWT claims. Identity only — role and approval are re-read from the
/// profiles table per session, never trusted from the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // identity id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn identity_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized("Invalid identity in token"))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub profile: Profile,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Requested staff role; defaults to teacher. Admin roles cannot be
    /// self-assigned.
    pub role: Option<Role>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// What the pending-approval page shows a gated actor.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApprovalStatusResponse {
    pub full_name: String,
    pub is_approved: bool,
    pub message: String,
}
