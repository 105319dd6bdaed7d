use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::lessons::model::{CreateLessonDto, Lesson, LessonFilterParams};
use crate::modules::users::model::Profile;
use crate::utils::errors::AppError;

const LESSON_COLUMNS: &str =
    "id, student_id, teacher_id, scheduled_at, duration_minutes, topic, created_at";

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db, actor, dto))]
    pub async fn schedule_lesson(
        db: &PgPool,
        actor: &Profile,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        let teacher_id = if actor.role.is_teaching_staff() {
            dto.teacher_id.unwrap_or(actor.id)
        } else {
            dto.teacher_id.ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("teacher_id is required"))
            })?
        };

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (student_id, teacher_id, scheduled_at, duration_minutes, topic)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(teacher_id)
        .bind(dto.scheduled_at)
        .bind(dto.duration_minutes.unwrap_or(60))
        .bind(&dto.topic)
        .fetch_one(db)
        .await
        .context("Failed to schedule lesson")
        .map_err(AppError::database)?;

        Ok(lesson)
    }

    #[instrument(skip(db, params))]
    pub async fn list_lessons(
        db: &PgPool,
        params: &LessonFilterParams,
    ) -> Result<Vec<Lesson>, AppError> {
        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons
             WHERE ($1::uuid IS NULL OR student_id = $1)
               AND ($2::uuid IS NULL OR teacher_id = $2)
             ORDER BY scheduled_at DESC"
        ))
        .bind(params.student_id)
        .bind(params.teacher_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch lessons")
        .map_err(AppError::database)?;

        Ok(lessons)
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete lesson")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Lesson not found")));
        }

        Ok(())
    }
}
