use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::db::actor_tx;
use crate::middleware::auth::Actor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let student = StudentService::create_student(&mut tx, &actor.0, dto).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/students",
    params(
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Students visible to the actor", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor, params))]
pub async fn get_students(
    State(state): State<AppState>,
    actor: Actor,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let (students, total) =
        StudentService::list_students(&mut tx, &actor.0, &params.pagination).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(PaginatedStudentsResponse {
        meta: params.pagination.meta(total),
        data: students,
    }))
}

#[utoipa::path(
    get,
    path = "/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor))]
pub async fn get_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let student = StudentService::get_student(&mut tx, &actor.0, id).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let student = StudentService::update_student(&mut tx, &actor.0, id, dto).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/students/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor))]
pub async fn delete_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    StudentService::delete_student(&mut tx, &actor.0, id).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(json!({ "message": "Student deleted successfully" })))
}
