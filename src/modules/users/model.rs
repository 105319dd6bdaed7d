use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::authz::Role;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

// Query-string booleans arrive as strings; empty means "not set".
fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref() {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean: {other}"
        ))),
    }
}

/// The authorization-relevant record attached to an identity.
///
/// One per identity, created at registration with `is_approved = false`
/// (the CLI-seeded superadmin being the only exception). Every access check
/// in the system reads from this row; it is removed only together with its
/// identity.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_approved: bool,
    /// Free-text secondary identifier; meaningful only for sales roles.
    pub sales_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Admin edit of a profile. Unset fields keep their current value.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub sales_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetApprovalDto {
    pub is_approved: bool,
}

/// Body of the privileged deletion endpoint. The id is optional on the wire
/// so the handler can fail closed with a 400 instead of a routing error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteUserDto {
    pub id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProfileFilterParams {
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_approved: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedProfilesResponse {
    pub data: Vec<Profile>,
    pub meta: PaginationMeta,
}
