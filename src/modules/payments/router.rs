use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{create_payment, delete_payment, get_payments};
use crate::state::AppState;

/// Nested under `/students/{student_id}`.
pub fn init_payments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_payments).post(create_payment))
        .route("/{payment_id}", delete(delete_payment))
}
