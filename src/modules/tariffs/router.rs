use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_tariff, delete_tariff, get_tariff, get_tariffs, update_tariff};
use crate::state::AppState;

pub fn init_tariffs_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_tariff).get(get_tariffs))
        .route(
            "/{id}",
            get(get_tariff).put(update_tariff).delete(delete_tariff),
        )
}
