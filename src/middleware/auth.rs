use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::modules::users::model::Profile;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and yields its claims.
///
/// This only proves identity. Handlers that need role/approval state use
/// [`Actor`], which carries the profile the navigation guard already loaded.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn identity_id(&self) -> Result<uuid::Uuid, AppError> {
        self.0.identity_id()
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Non-rejecting variant used by the navigation guard: a missing or invalid
/// token simply means "unauthenticated", which is a decision input rather
/// than an error there.
pub fn bearer_claims(headers: &HeaderMap, jwt_config: &JwtConfig) -> Option<Claims> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?
        .strip_prefix("Bearer ")?;

    verify_token(token, jwt_config).ok()
}

/// The profile of the actor behind the current request, as loaded by the
/// navigation guard. Only present on requests the guard allowed with a
/// loaded profile; handlers behind the guard can rely on it.
#[derive(Debug, Clone)]
pub struct Actor(pub Profile);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Profile>()
            .cloned()
            .map(Actor)
            .ok_or_else(|| AppError::unauthorized("No authenticated profile for this request"))
    }
}
