//! Request-processing middleware.
//!
//! - [`auth`]: bearer-token extractors ([`auth::AuthUser`] for identity,
//!   [`auth::Actor`] for the guard-loaded profile)
//! - [`guard`]: the navigation guard applied to the whole application
//!   surface
//!
//! Flow: a request carries `Authorization: Bearer <token>`; the guard
//! resolves the session's profile through the cache, runs the access
//! decision, and either forwards the request (with the profile attached) or
//! answers with the decided redirect.

pub mod auth;
pub mod guard;
