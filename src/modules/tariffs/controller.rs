use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::tariffs::model::{CreateTariffDto, Tariff, UpdateTariffDto};
use crate::modules::tariffs::service::TariffService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/tariffs",
    request_body = CreateTariffDto,
    responses(
        (status = 201, description = "Tariff created", body = Tariff),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tariffs"
)]
#[instrument(skip(state, dto))]
pub async fn create_tariff(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTariffDto>,
) -> Result<(StatusCode, Json<Tariff>), AppError> {
    let tariff = TariffService::create_tariff(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(tariff)))
}

#[utoipa::path(
    get,
    path = "/tariffs",
    responses(
        (status = 200, description = "All tariffs", body = [Tariff]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tariffs"
)]
#[instrument(skip(state))]
pub async fn get_tariffs(State(state): State<AppState>) -> Result<Json<Vec<Tariff>>, AppError> {
    let tariffs = TariffService::list_tariffs(&state.db).await?;
    Ok(Json(tariffs))
}

#[utoipa::path(
    get,
    path = "/tariffs/{id}",
    params(("id" = Uuid, Path, description = "Tariff ID")),
    responses(
        (status = 200, description = "Tariff details", body = Tariff),
        (status = 404, description = "Tariff not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tariffs"
)]
#[instrument(skip(state))]
pub async fn get_tariff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tariff>, AppError> {
    let tariff = TariffService::get_tariff(&state.db, id).await?;
    Ok(Json(tariff))
}

#[utoipa::path(
    put,
    path = "/tariffs/{id}",
    params(("id" = Uuid, Path, description = "Tariff ID")),
    request_body = UpdateTariffDto,
    responses(
        (status = 200, description = "Tariff updated", body = Tariff),
        (status = 404, description = "Tariff not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tariffs"
)]
#[instrument(skip(state, dto))]
pub async fn update_tariff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTariffDto>,
) -> Result<Json<Tariff>, AppError> {
    let tariff = TariffService::update_tariff(&state.db, id, dto).await?;
    Ok(Json(tariff))
}

#[utoipa::path(
    delete,
    path = "/tariffs/{id}",
    params(("id" = Uuid, Path, description = "Tariff ID")),
    responses(
        (status = 200, description = "Tariff deleted"),
        (status = 404, description = "Tariff not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tariffs"
)]
#[instrument(skip(state))]
pub async fn delete_tariff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    TariffService::delete_tariff(&state.db, id).await?;
    Ok(Json(json!({ "message": "Tariff deleted successfully" })))
}
