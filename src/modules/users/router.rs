use axum::{
    Router,
    routing::{get, patch, post},
};

use super::controller::{delete_user, get_user, get_users, set_user_approval, update_user};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/delete", post(delete_user))
        .route("/{id}", get(get_user).patch(update_user))
        .route("/{id}/approval", patch(set_user_approval))
}
