use axum::{
    Router,
    routing::{post, put},
};

use super::controller::{create_lead, delete_lead, get_leads, update_lead};
use crate::state::AppState;

pub fn init_leads_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lead).get(get_leads))
        .route("/{id}", put(update_lead).delete(delete_lead))
}
