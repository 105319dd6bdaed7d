use anyhow::Context;
use sqlx::PgConnection;
use tracing::instrument;

use crate::modules::reports::model::SummaryReport;
use crate::utils::errors::AppError;

pub struct ReportService;

impl ReportService {
    #[instrument(skip(conn))]
    pub async fn summary(conn: &mut PgConnection) -> Result<SummaryReport, AppError> {
        let visible_students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&mut *conn)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)?;

        let visible_payments_cents: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(amount_cents), 0) FROM student_payments")
                .fetch_one(&mut *conn)
                .await
                .context("Failed to sum payments")
                .map_err(AppError::database)?;

        let active_tariffs: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tariffs WHERE is_active")
                .fetch_one(&mut *conn)
                .await
                .context("Failed to count tariffs")
                .map_err(AppError::database)?;

        let pending_approvals: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE NOT is_approved")
                .fetch_one(&mut *conn)
                .await
                .context("Failed to count pending approvals")
                .map_err(AppError::database)?;

        let scheduled_lessons: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE scheduled_at > NOW()")
                .fetch_one(&mut *conn)
                .await
                .context("Failed to count lessons")
                .map_err(AppError::database)?;

        Ok(SummaryReport {
            visible_students,
            visible_payments_cents,
            active_tariffs,
            pending_approvals,
            scheduled_lessons,
        })
    }
}
