use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::leads::model::{CreateLeadDto, Lead, UpdateLeadDto};
use crate::modules::users::model::Profile;
use crate::utils::errors::AppError;

const LEAD_COLUMNS: &str = "id, full_name, phone, source, status, manager_id, created_at";

/// Lead queries. Ownership mirrors students: the creating manager owns the
/// lead, admins see everything.
pub struct LeadService;

impl LeadService {
    #[instrument(skip(db, actor, dto))]
    pub async fn create_lead(
        db: &PgPool,
        actor: &Profile,
        dto: CreateLeadDto,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(&format!(
            "INSERT INTO leads (full_name, phone, source, manager_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {LEAD_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(&dto.source)
        .bind(actor.id)
        .fetch_one(db)
        .await
        .context("Failed to insert lead")
        .map_err(AppError::database)?;

        Ok(lead)
    }

    #[instrument(skip(db, actor))]
    pub async fn list_leads(db: &PgPool, actor: &Profile) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads
             WHERE ($1 OR manager_id = $2)
             ORDER BY created_at DESC"
        ))
        .bind(actor.role.is_admin())
        .bind(actor.id)
        .fetch_all(db)
        .await
        .context("Failed to fetch leads")
        .map_err(AppError::database)?;

        Ok(leads)
    }

    #[instrument(skip(db, actor, dto))]
    pub async fn update_lead(
        db: &PgPool,
        actor: &Profile,
        id: Uuid,
        dto: UpdateLeadDto,
    ) -> Result<Lead, AppError> {
        let existing = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1 AND ($2 OR manager_id = $3)"
        ))
        .bind(id)
        .bind(actor.role.is_admin())
        .bind(actor.id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch lead")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lead not found")))?;

        let lead = sqlx::query_as::<_, Lead>(&format!(
            "UPDATE leads SET full_name = $2, phone = $3, source = $4, status = $5
             WHERE id = $1
             RETURNING {LEAD_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.full_name.unwrap_or(existing.full_name))
        .bind(dto.phone.or(existing.phone))
        .bind(dto.source.or(existing.source))
        .bind(dto.status.unwrap_or(existing.status))
        .fetch_one(db)
        .await
        .context("Failed to update lead")
        .map_err(AppError::database)?;

        Ok(lead)
    }

    #[instrument(skip(db, actor))]
    pub async fn delete_lead(db: &PgPool, actor: &Profile, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND ($2 OR manager_id = $3)")
            .bind(id)
            .bind(actor.role.is_admin())
            .bind(actor.id)
            .execute(db)
            .await
            .context("Failed to delete lead")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Lead not found")));
        }

        Ok(())
    }
}
