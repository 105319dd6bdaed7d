use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Tariff {
    pub id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub lessons_included: i32,
    pub duration_days: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTariffDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(range(min = 0))]
    pub lessons_included: i32,
    #[validate(range(min = 1))]
    pub duration_days: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTariffDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    #[validate(range(min = 0))]
    pub lessons_included: Option<i32>,
    #[validate(range(min = 1))]
    pub duration_days: Option<i32>,
    pub is_active: Option<bool>,
}
