use axum::{
    Router,
    routing::{delete, post},
};

use super::controller::{create_evaluation, delete_evaluation, get_evaluations};
use crate::state::AppState;

pub fn init_evaluations_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_evaluation).get(get_evaluations))
        .route("/{id}", delete(delete_evaluation))
}
