use anyhow::Context;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::payments::model::{CreatePaymentDto, StudentPayment};
use crate::modules::students::service::StudentService;
use crate::modules::users::model::Profile;
use crate::utils::errors::AppError;

const PAYMENT_COLUMNS: &str =
    "id, student_id, tariff_id, amount_cents, paid_on, receipt_url, created_at";

/// Payment queries. Authorization is entirely inherited: every entry point
/// first resolves the parent student through [`StudentService::get_student`]
/// (owning manager or admin), and the row-security policy on
/// `student_payments` repeats the same join underneath.
pub struct PaymentService;

impl PaymentService {
    #[instrument(skip(conn, actor, dto))]
    pub async fn record_payment(
        conn: &mut PgConnection,
        actor: &Profile,
        student_id: Uuid,
        dto: CreatePaymentDto,
    ) -> Result<StudentPayment, AppError> {
        StudentService::get_student(&mut *conn, actor, student_id).await?;

        let payment = sqlx::query_as::<_, StudentPayment>(&format!(
            "INSERT INTO student_payments (student_id, tariff_id, amount_cents, paid_on, receipt_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(student_id)
        .bind(dto.tariff_id)
        .bind(dto.amount_cents)
        .bind(dto.paid_on)
        .bind(&dto.receipt_url)
        .fetch_one(conn)
        .await
        .context("Failed to record payment")
        .map_err(AppError::database)?;

        Ok(payment)
    }

    #[instrument(skip(conn, actor))]
    pub async fn list_payments(
        conn: &mut PgConnection,
        actor: &Profile,
        student_id: Uuid,
    ) -> Result<Vec<StudentPayment>, AppError> {
        StudentService::get_student(&mut *conn, actor, student_id).await?;

        let payments = sqlx::query_as::<_, StudentPayment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM student_payments
             WHERE student_id = $1
             ORDER BY paid_on DESC, created_at DESC"
        ))
        .bind(student_id)
        .fetch_all(conn)
        .await
        .context("Failed to fetch payments")
        .map_err(AppError::database)?;

        Ok(payments)
    }

    #[instrument(skip(conn, actor))]
    pub async fn delete_payment(
        conn: &mut PgConnection,
        actor: &Profile,
        student_id: Uuid,
        payment_id: Uuid,
    ) -> Result<(), AppError> {
        StudentService::get_student(&mut *conn, actor, student_id).await?;

        let result =
            sqlx::query("DELETE FROM student_payments WHERE id = $1 AND student_id = $2")
                .bind(payment_id)
                .bind(student_id)
                .execute(conn)
                .await
                .context("Failed to delete payment")
                .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Payment not found")));
        }

        Ok(())
    }
}
