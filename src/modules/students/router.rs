use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_student, delete_student, get_student, get_students, update_student,
};
use crate::state::AppState;

// The payments router is nested at "/{student_id}/payments"; the item routes
// here share that parameter name so the two trees merge cleanly.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route(
            "/{student_id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}
