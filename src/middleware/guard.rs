use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::debug;

use crate::authz::routes::{
    FORBIDDEN_PATH, HOME_PATH, LOGIN_PATH, PENDING_APPROVAL_PATH, is_public_route,
};
use crate::authz::{AccessContext, AccessDecision, decide};
use crate::middleware::auth::bearer_claims;
use crate::modules::users::model::Profile;
use crate::state::AppState;

/// Navigation guard. Runs on every request to the application surface,
/// before any handler: rebuilds the access context from scratch (bearer
/// token, session cache, target path), asks the decision function, and acts
/// on the verdict.
///
/// Re-running the guard with unchanged state always produces the same
/// response; all per-session state lives in the session cache, none here.
pub async fn access_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let public = is_public_route(&path);

    let mut profile: Option<Profile> = None;
    let mut authenticated = false;
    let mut profile_loaded = false;

    if let Some(claims) = bearer_claims(req.headers(), &state.jwt_config) {
        if let Ok(identity) = claims.identity_id() {
            authenticated = true;
            let cache = state.sessions.get_or_create(identity).await;
            // Coalesced: concurrent requests share one store fetch. A
            // failure leaves the cache unloaded and we fall through to
            // Defer — never to a default role.
            if let Err(err) = cache.fetch_profile(false).await {
                debug!(identity = %identity, error = %err, "profile fetch failed");
            }
            let snapshot = cache.snapshot().await;
            profile_loaded = snapshot.profile_loaded;
            profile = snapshot.profile;
        }
    }

    let ctx = AccessContext {
        authenticated,
        profile_loaded,
        approved: profile.as_ref().map(|p| p.is_approved).unwrap_or(false),
        role: profile.as_ref().map(|p| p.role),
        path: &path,
        public,
    };

    match decide(&ctx) {
        AccessDecision::Allow => {
            if let Some(profile) = profile {
                req.extensions_mut().insert(profile);
            }
            next.run(req).await
        }
        AccessDecision::Defer => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "1")],
            Json(json!({ "error": "Profile is still loading; retry shortly" })),
        )
            .into_response(),
        AccessDecision::RedirectLogin => Redirect::to(LOGIN_PATH).into_response(),
        AccessDecision::RedirectPendingApproval => {
            Redirect::to(PENDING_APPROVAL_PATH).into_response()
        }
        AccessDecision::RedirectHome => Redirect::to(HOME_PATH).into_response(),
        AccessDecision::RedirectForbidden => Redirect::to(FORBIDDEN_PATH).into_response(),
    }
}
