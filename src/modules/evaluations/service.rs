use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::evaluations::model::{CreateEvaluationDto, Evaluation};
use crate::modules::users::model::Profile;
use crate::utils::errors::AppError;

const EVALUATION_COLUMNS: &str = "id, student_id, teacher_id, score, comments, created_at";

pub struct EvaluationService;

impl EvaluationService {
    #[instrument(skip(db, actor, dto))]
    pub async fn create_evaluation(
        db: &PgPool,
        actor: &Profile,
        dto: CreateEvaluationDto,
    ) -> Result<Evaluation, AppError> {
        let evaluation = sqlx::query_as::<_, Evaluation>(&format!(
            "INSERT INTO evaluations (student_id, teacher_id, score, comments)
             VALUES ($1, $2, $3, $4)
             RETURNING {EVALUATION_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(actor.id)
        .bind(dto.score)
        .bind(&dto.comments)
        .fetch_one(db)
        .await
        .context("Failed to create evaluation")
        .map_err(AppError::database)?;

        Ok(evaluation)
    }

    #[instrument(skip(db))]
    pub async fn list_evaluations(
        db: &PgPool,
        student_id: Option<Uuid>,
    ) -> Result<Vec<Evaluation>, AppError> {
        let evaluations = sqlx::query_as::<_, Evaluation>(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM evaluations
             WHERE ($1::uuid IS NULL OR student_id = $1)
             ORDER BY created_at DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch evaluations")
        .map_err(AppError::database)?;

        Ok(evaluations)
    }

    #[instrument(skip(db))]
    pub async fn delete_evaluation(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM evaluations WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete evaluation")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Evaluation not found"
            )));
        }

        Ok(())
    }
}
