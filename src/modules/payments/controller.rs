use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::db::actor_tx;
use crate::middleware::auth::Actor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::payments::model::{CreatePaymentDto, StudentPayment};
use crate::modules::payments::service::PaymentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/students/{student_id}/payments",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = StudentPayment),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, actor, dto))]
pub async fn create_payment(
    State(state): State<AppState>,
    actor: Actor,
    Path(student_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreatePaymentDto>,
) -> Result<(StatusCode, Json<StudentPayment>), AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let payment = PaymentService::record_payment(&mut tx, &actor.0, student_id, dto).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    get,
    path = "/students/{student_id}/payments",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Payments for the student", body = [StudentPayment]),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, actor))]
pub async fn get_payments(
    State(state): State<AppState>,
    actor: Actor,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<StudentPayment>>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    let payments = PaymentService::list_payments(&mut tx, &actor.0, student_id).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(payments))
}

#[utoipa::path(
    delete,
    path = "/students/{student_id}/payments/{payment_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("payment_id" = Uuid, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, actor))]
pub async fn delete_payment(
    State(state): State<AppState>,
    actor: Actor,
    Path((student_id, payment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut tx = actor_tx(&state.db, actor.0.id).await?;
    PaymentService::delete_payment(&mut tx, &actor.0, student_id, payment_id).await?;
    tx.commit().await.map_err(AppError::database)?;

    Ok(Json(json!({ "message": "Payment deleted successfully" })))
}
