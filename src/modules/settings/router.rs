use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{get_settings, put_setting};
use crate::state::AppState;

pub fn init_settings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings))
        .route("/{key}", put(put_setting))
}
