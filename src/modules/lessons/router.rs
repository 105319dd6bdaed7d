use axum::{
    Router,
    routing::{delete, post},
};

use super::controller::{create_lesson, delete_lesson, get_lessons};
use crate::state::AppState;

pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lesson).get(get_lessons))
        .route("/{id}", delete(delete_lesson))
}
