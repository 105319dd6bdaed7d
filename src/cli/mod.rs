use sqlx::PgPool;
use uuid::Uuid;

use crate::authz::Role;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Seed the first administrator. This is the one profile that is born
/// approved; superadmin accounts are never creatable through the API.
pub async fn create_superadmin(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, AppError> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM auth_identities WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(AppError::database)?;

    if existing.is_some() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "An account with this email already exists"
        )));
    }

    let password_hash = hash_password(password)?;

    let mut tx = pool.begin().await.map_err(AppError::database)?;

    let (identity_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO auth_identities (email, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::database)?;

    sqlx::query(
        "INSERT INTO profiles (id, email, full_name, role, is_approved)
         VALUES ($1, $2, $3, $4, TRUE)",
    )
    .bind(identity_id)
    .bind(email)
    .bind(full_name)
    .bind(Role::Superadmin)
    .execute(&mut *tx)
    .await
    .map_err(AppError::database)?;

    tx.commit().await.map_err(AppError::database)?;

    Ok(identity_id)
}
