use serde::Serialize;
use utoipa::ToSchema;

/// Aggregates for the management dashboard. Student and payment figures are
/// computed inside an actor-scoped transaction, so each caller only ever
/// aggregates the rows the row-security layer lets them see.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryReport {
    pub visible_students: i64,
    pub visible_payments_cents: i64,
    pub active_tariffs: i64,
    pub pending_approvals: i64,
    pub scheduled_lessons: i64,
}
