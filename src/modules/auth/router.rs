use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_me, login_user, pending_approval, register_user};
use crate::state::AppState;

/// Auth routes that sit behind the navigation guard. Logout is mounted
/// separately in the main router: it is an identity-provider verb, not a
/// navigation, and must work for unapproved actors too.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
        .route("/me", get(get_me))
        .route("/pending-approval", get(pending_approval))
}
