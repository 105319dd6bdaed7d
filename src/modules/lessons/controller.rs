use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::Actor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::lessons::model::{CreateLessonDto, Lesson, LessonFilterParams};
use crate::modules::lessons::service::LessonService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson scheduled", body = Lesson),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, actor, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = LessonService::schedule_lesson(&state.db, &actor.0, dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    get,
    path = "/lessons",
    params(
        ("student_id" = Option<Uuid>, Query, description = "Filter by student"),
        ("teacher_id" = Option<Uuid>, Query, description = "Filter by teacher")
    ),
    responses(
        (status = 200, description = "Lessons", body = [Lesson]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, params))]
pub async fn get_lessons(
    State(state): State<AppState>,
    Query(params): Query<LessonFilterParams>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::list_lessons(&state.db, &params).await?;
    Ok(Json(lessons))
}

#[utoipa::path(
    delete,
    path = "/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson deleted"),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    LessonService::delete_lesson(&state.db, id).await?;
    Ok(Json(json!({ "message": "Lesson deleted successfully" })))
}
