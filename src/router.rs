use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::request_logging;
use crate::middleware::auth::Actor;
use crate::middleware::guard::access_guard;
use crate::modules::auth::controller::logout_user;
use crate::modules::auth::router::init_auth_router;
use crate::modules::evaluations::router::init_evaluations_router;
use crate::modules::leads::router::init_leads_router;
use crate::modules::lessons::router::init_lessons_router;
use crate::modules::payments::router::init_payments_router;
use crate::modules::reports::router::init_reports_router;
use crate::modules::sales::router::init_sales_router;
use crate::modules::settings::router::init_settings_router;
use crate::modules::students::router::init_students_router;
use crate::modules::tariffs::router::init_tariffs_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

async fn home(actor: Actor) -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("Welcome back, {}", actor.0.full_name),
        "role": actor.0.role,
    }))
}

async fn forbidden_page() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "You do not have access to this page" })),
    )
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found" })),
    )
}

pub fn init_router(state: AppState) -> Router {
    // Every route on the application surface sits behind the navigation
    // guard, including the fallback: unknown paths still go through the
    // access decision before they 404.
    let app_routes = Router::new()
        .route("/", get(home))
        .route("/403", get(forbidden_page))
        .nest("/auth", init_auth_router())
        .nest("/users", init_users_router())
        .nest(
            "/students",
            init_students_router().nest("/{student_id}/payments", init_payments_router()),
        )
        .nest("/tariffs", init_tariffs_router())
        .nest("/sales", init_sales_router())
        .nest("/leads", init_leads_router())
        .nest("/lessons", init_lessons_router())
        .nest("/evaluations", init_evaluations_router())
        .nest("/reports", init_reports_router())
        .nest("/settings", init_settings_router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), access_guard));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        // Logout is an identity-provider verb, not a navigation; it stays
        // reachable for unapproved actors, outside the guard.
        .route("/auth/logout", post(logout_user))
        .merge(app_routes)
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(request_logging))
}
