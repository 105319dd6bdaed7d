use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::Actor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::leads::model::{CreateLeadDto, Lead, UpdateLeadDto};
use crate::modules::leads::service::LeadService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/leads",
    request_body = CreateLeadDto,
    responses(
        (status = 201, description = "Lead created", body = Lead),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leads"
)]
#[instrument(skip(state, actor, dto))]
pub async fn create_lead(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateLeadDto>,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    let lead = LeadService::create_lead(&state.db, &actor.0, dto).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

#[utoipa::path(
    get,
    path = "/leads",
    responses(
        (status = 200, description = "Leads visible to the actor", body = [Lead]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leads"
)]
#[instrument(skip(state, actor))]
pub async fn get_leads(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<Lead>>, AppError> {
    let leads = LeadService::list_leads(&state.db, &actor.0).await?;
    Ok(Json(leads))
}

#[utoipa::path(
    put,
    path = "/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead ID")),
    request_body = UpdateLeadDto,
    responses(
        (status = 200, description = "Lead updated", body = Lead),
        (status = 404, description = "Lead not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leads"
)]
#[instrument(skip(state, actor, dto))]
pub async fn update_lead(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLeadDto>,
) -> Result<Json<Lead>, AppError> {
    let lead = LeadService::update_lead(&state.db, &actor.0, id, dto).await?;
    Ok(Json(lead))
}

#[utoipa::path(
    delete,
    path = "/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead deleted"),
        (status = 404, description = "Lead not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leads"
)]
#[instrument(skip(state, actor))]
pub async fn delete_lead(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    LeadService::delete_lead(&state.db, &actor.0, id).await?;
    Ok(Json(json!({ "message": "Lead deleted successfully" })))
}
