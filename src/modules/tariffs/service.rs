use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::tariffs::model::{CreateTariffDto, Tariff, UpdateTariffDto};
use crate::utils::errors::AppError;

const TARIFF_COLUMNS: &str =
    "id, name, price_cents, lessons_included, duration_days, is_active, created_at";

pub struct TariffService;

impl TariffService {
    #[instrument(skip(db, dto))]
    pub async fn create_tariff(db: &PgPool, dto: CreateTariffDto) -> Result<Tariff, AppError> {
        let tariff = sqlx::query_as::<_, Tariff>(&format!(
            "INSERT INTO tariffs (name, price_cents, lessons_included, duration_days)
             VALUES ($1, $2, $3, $4)
             RETURNING {TARIFF_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(dto.price_cents)
        .bind(dto.lessons_included)
        .bind(dto.duration_days)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Tariff named {} already exists",
                        dto.name
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(tariff)
    }

    #[instrument(skip(db))]
    pub async fn list_tariffs(db: &PgPool) -> Result<Vec<Tariff>, AppError> {
        let tariffs = sqlx::query_as::<_, Tariff>(&format!(
            "SELECT {TARIFF_COLUMNS} FROM tariffs ORDER BY name"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch tariffs")
        .map_err(AppError::database)?;

        Ok(tariffs)
    }

    #[instrument(skip(db))]
    pub async fn get_tariff(db: &PgPool, id: Uuid) -> Result<Tariff, AppError> {
        let tariff = sqlx::query_as::<_, Tariff>(&format!(
            "SELECT {TARIFF_COLUMNS} FROM tariffs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch tariff")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Tariff not found")))?;

        Ok(tariff)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_tariff(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTariffDto,
    ) -> Result<Tariff, AppError> {
        let existing = Self::get_tariff(db, id).await?;

        let tariff = sqlx::query_as::<_, Tariff>(&format!(
            "UPDATE tariffs
             SET name = $2, price_cents = $3, lessons_included = $4, duration_days = $5,
                 is_active = $6
             WHERE id = $1
             RETURNING {TARIFF_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.price_cents.unwrap_or(existing.price_cents))
        .bind(dto.lessons_included.unwrap_or(existing.lessons_included))
        .bind(dto.duration_days.unwrap_or(existing.duration_days))
        .bind(dto.is_active.unwrap_or(existing.is_active))
        .fetch_one(db)
        .await
        .context("Failed to update tariff")
        .map_err(AppError::database)?;

        Ok(tariff)
    }

    #[instrument(skip(db))]
    pub async fn delete_tariff(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tariffs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete tariff")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Tariff not found")));
        }

        Ok(())
    }
}
