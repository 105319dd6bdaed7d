use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A prospective student being worked by the sales side.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Lead {
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub manager_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLeadDto {
    #[validate(length(min = 1))]
    pub full_name: String,
    pub phone: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLeadDto {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    #[validate(length(min = 1))]
    pub status: Option<String>,
}
