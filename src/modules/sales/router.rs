use axum::{Router, routing::get};

use super::controller::{get_my_student, get_my_students};
use crate::state::AppState;

pub fn init_sales_router() -> Router<AppState> {
    Router::new()
        .route("/students", get(get_my_students))
        .route("/students/{id}", get(get_my_student))
}
