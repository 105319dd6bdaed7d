use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::actor_tx;
use crate::middleware::auth::Actor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::reports::model::SummaryReport;
use crate::modules::reports::service::ReportService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/reports/summary",
    responses(
        (status = 200, description = "Aggregates over the rows visible to the caller", body = SummaryReport),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state, actor))]
pub async fn get_summary(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<SummaryReport>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let report = ReportService::summary(&mut tx).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(report))
}
