use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::settings::model::{OrgSetting, UpsertSettingDto};
use crate::modules::settings::service::SettingsService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/settings",
    responses(
        (status = 200, description = "All organization settings", body = [OrgSetting]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Settings"
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrgSetting>>, AppError> {
    let settings = SettingsService::list_settings(&state.db).await?;
    Ok(Json(settings))
}

#[utoipa::path(
    put,
    path = "/settings/{key}",
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpsertSettingDto,
    responses(
        (status = 200, description = "Setting stored", body = OrgSetting),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Settings"
)]
#[instrument(skip(state, dto))]
pub async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpsertSettingDto>,
) -> Result<Json<OrgSetting>, AppError> {
    let setting = SettingsService::upsert_setting(&state.db, &key, &dto.value).await?;
    Ok(Json(setting))
}
