use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::Actor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::evaluations::model::{CreateEvaluationDto, Evaluation};
use crate::modules::evaluations::service::EvaluationService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize)]
pub struct EvaluationFilterParams {
    pub student_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/evaluations",
    request_body = CreateEvaluationDto,
    responses(
        (status = 201, description = "Evaluation recorded", body = Evaluation),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
#[instrument(skip(state, actor, dto))]
pub async fn create_evaluation(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateEvaluationDto>,
) -> Result<(StatusCode, Json<Evaluation>), AppError> {
    let evaluation = EvaluationService::create_evaluation(&state.db, &actor.0, dto).await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}

#[utoipa::path(
    get,
    path = "/evaluations",
    params(("student_id" = Option<Uuid>, Query, description = "Filter by student")),
    responses(
        (status = 200, description = "Evaluations", body = [Evaluation]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
#[instrument(skip(state, params))]
pub async fn get_evaluations(
    State(state): State<AppState>,
    Query(params): Query<EvaluationFilterParams>,
) -> Result<Json<Vec<Evaluation>>, AppError> {
    let evaluations = EvaluationService::list_evaluations(&state.db, params.student_id).await?;
    Ok(Json(evaluations))
}

#[utoipa::path(
    delete,
    path = "/evaluations/{id}",
    params(("id" = Uuid, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Evaluation deleted"),
        (status = 404, description = "Evaluation not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Evaluations"
)]
#[instrument(skip(state))]
pub async fn delete_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    EvaluationService::delete_evaluation(&state.db, id).await?;
    Ok(Json(json!({ "message": "Evaluation deleted successfully" })))
}
