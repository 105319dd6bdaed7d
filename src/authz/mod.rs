//! Access-control core: the role taxonomy, the declarative route permission
//! table, and the pure access decision function the navigation guard runs on
//! every request.
//!
//! These checks are the advisory half of a two-layer design; the
//! authoritative half is the row-security policy set in the database (see
//! `migrations/0003_row_security.sql` and [`crate::db::actor_tx`]). The two
//! intentionally restate the same rules.

pub mod decision;
pub mod role;
pub mod routes;

pub use decision::{AccessContext, AccessDecision, decide};
pub use role::Role;
pub use routes::{can_access_route, is_public_route, resolve_permission};
