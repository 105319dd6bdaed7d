use anyhow::Context;
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::modules::users::model::{Profile, ProfileFilterParams, UpdateProfileDto};
use crate::utils::errors::AppError;

pub struct UserService;

impl UserService {
    #[instrument(skip(db, params))]
    pub async fn list_profiles(
        db: &PgPool,
        params: &ProfileFilterParams,
    ) -> Result<(Vec<Profile>, i64), AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM profiles
             WHERE ($1::profile_role IS NULL OR role = $1)
               AND ($2::boolean IS NULL OR is_approved = $2)",
        )
        .bind(params.role)
        .bind(params.is_approved)
        .fetch_one(db)
        .await
        .context("Failed to count profiles")
        .map_err(AppError::database)?;

        let profiles = sqlx::query_as::<_, Profile>(
            "SELECT id, email, full_name, role, is_approved, sales_id, created_at
             FROM profiles
             WHERE ($1::profile_role IS NULL OR role = $1)
               AND ($2::boolean IS NULL OR is_approved = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(params.role)
        .bind(params.is_approved)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await
        .context("Failed to fetch profiles")
        .map_err(AppError::database)?;

        Ok((profiles, total))
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, id: Uuid) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, full_name, role, is_approved, sales_id, created_at
             FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch profile")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Profile not found")))?;

        Ok(profile)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<Profile, AppError> {
        let existing = Self::get_profile(db, id).await?;

        let full_name = dto.full_name.unwrap_or(existing.full_name);
        let role = dto.role.unwrap_or(existing.role);
        let sales_id = dto.sales_id.or(existing.sales_id);

        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles
             SET full_name = $2, role = $3, sales_id = $4
             WHERE id = $1
             RETURNING id, email, full_name, role, is_approved, sales_id, created_at",
        )
        .bind(id)
        .bind(&full_name)
        .bind(role)
        .bind(&sales_id)
        .fetch_one(db)
        .await
        .context("Failed to update profile")
        .map_err(AppError::database)?;

        Ok(profile)
    }

    #[instrument(skip(db))]
    pub async fn set_approval(
        db: &PgPool,
        id: Uuid,
        is_approved: bool,
    ) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET is_approved = $2 WHERE id = $1
             RETURNING id, email, full_name, role, is_approved, sales_id, created_at",
        )
        .bind(id)
        .bind(is_approved)
        .fetch_optional(db)
        .await
        .context("Failed to update approval")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Profile not found")))?;

        Ok(profile)
    }

    /// Remove an identity and, through the cascade, its profile — one
    /// transaction, so neither half can be orphaned.
    ///
    /// The underlying store error is logged but never surfaced past a
    /// generic envelope.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let result = sqlx::query("DELETE FROM auth_identities WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(user_id = %id, error = %e, "identity deletion failed");
                AppError::internal(anyhow::anyhow!("server error"))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        tx.commit().await.map_err(|e| {
            error!(user_id = %id, error = %e, "identity deletion failed");
            AppError::internal(anyhow::anyhow!("server error"))
        })?;

        Ok(())
    }
}
