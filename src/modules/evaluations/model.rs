use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Evaluation {
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub score: i32,
    pub comments: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvaluationDto {
    pub student_id: Uuid,
    #[validate(range(min = 1, max = 10))]
    pub score: i32,
    pub comments: Option<String>,
}
