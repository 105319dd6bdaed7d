use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A payment recorded against a student. Carries no ownership of its own:
/// whoever can see the parent student can see (and record) its payments.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StudentPayment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub tariff_id: Option<Uuid>,
    pub amount_cents: i64,
    pub paid_on: chrono::NaiveDate,
    /// Link to the uploaded receipt in external object storage.
    pub receipt_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentDto {
    pub tariff_id: Option<Uuid>,
    #[validate(range(min = 1))]
    pub amount_cents: i64,
    pub paid_on: chrono::NaiveDate,
    #[validate(url)]
    pub receipt_url: Option<String>,
}
