use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub topic: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    pub student_id: Uuid,
    /// Defaults to the calling teacher.
    pub teacher_id: Option<Uuid>,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    #[validate(range(min = 15, max = 240))]
    pub duration_minutes: Option<i32>,
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LessonFilterParams {
    pub student_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
}
