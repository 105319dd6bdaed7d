use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::utils::errors::AppError;

pub async fn run_migrations(pool: &PgPool) {
    sqlx::migrate!()
        .run(pool)
        .await
        .expect("Failed to run database migrations");
}

/// Open a transaction scoped to a verified actor.
///
/// Sets `app.actor_id` for the duration of the transaction
/// (`set_config(..., is_local => true)`), which is what the row-security
/// policies key off. Queries for ownership-gated tables must run inside one
/// of these; a connection without the setting sees no rows.
pub async fn actor_tx(
    pool: &PgPool,
    actor: Uuid,
) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = pool.begin().await.map_err(AppError::database)?;

    sqlx::query("SELECT set_config('app.actor_id', $1, true)")
        .bind(actor.to_string())
        .execute(&mut *tx)
        .await
        .map_err(AppError::database)?;

    Ok(tx)
}
