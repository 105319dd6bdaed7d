use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::db::actor_tx;
use crate::middleware::auth::Actor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{PaginatedStudentsResponse, Student, StudentFilterParams};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

// The sales-side student views. Deliberately a separate namespace from
// /students: the route table grants /sales/* to sales staff only, and these
// handlers always scope to the caller's own book of students — even for the
// superadmin passing through on the role override.

#[utoipa::path(
    get,
    path = "/sales/students",
    params(
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Students managed by the caller", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
#[instrument(skip(state, actor, params))]
pub async fn get_my_students(
    State(state): State<AppState>,
    actor: Actor,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let (students, total) =
        StudentService::list_for_manager(&mut tx, actor.0.id, &params.pagination).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(PaginatedStudentsResponse {
        meta: params.pagination.meta(total),
        data: students,
    }))
}

#[utoipa::path(
    get,
    path = "/sales/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student managed by the caller", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
#[instrument(skip(state, actor))]
pub async fn get_my_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;

    let student = sqlx::query_as::<_, Student>(
        "SELECT id, full_name, phone, email, tariff_id, manager_id, notes, created_at, updated_at
         FROM students WHERE id = $1 AND manager_id = $2",
    )
    .bind(id)
    .bind(actor.0.id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(AppError::database)?
    .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(student))
}
