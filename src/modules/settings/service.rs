use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::settings::model::OrgSetting;
use crate::utils::errors::AppError;

pub struct SettingsService;

impl SettingsService {
    #[instrument(skip(db))]
    pub async fn list_settings(db: &PgPool) -> Result<Vec<OrgSetting>, AppError> {
        let settings = sqlx::query_as::<_, OrgSetting>(
            "SELECT key, value, updated_at FROM org_settings ORDER BY key",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch settings")
        .map_err(AppError::database)?;

        Ok(settings)
    }

    #[instrument(skip(db, value))]
    pub async fn upsert_setting(
        db: &PgPool,
        key: &str,
        value: &str,
    ) -> Result<OrgSetting, AppError> {
        let setting = sqlx::query_as::<_, OrgSetting>(
            "INSERT INTO org_settings (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING key, value, updated_at",
        )
        .bind(key)
        .bind(value)
        .fetch_one(db)
        .await
        .context("Failed to upsert setting")
        .map_err(AppError::database)?;

        Ok(setting)
    }
}
