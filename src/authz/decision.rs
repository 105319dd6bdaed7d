use super::role::Role;
use super::routes::{PENDING_APPROVAL_PATH, can_access_route};

/// Everything the decision function is allowed to look at. Assembled by the
/// navigation guard from the bearer token, the session cache snapshot, and
/// the request path.
#[derive(Debug, Clone)]
pub struct AccessContext<'a> {
    pub authenticated: bool,
    pub profile_loaded: bool,
    pub approved: bool,
    pub role: Option<Role>,
    pub path: &'a str,
    pub public: bool,
}

/// Outcome of an access evaluation. `Defer` means "the profile is still
/// loading; hold the navigation" — it is a suspension signal, never a
/// redirect and never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectLogin,
    RedirectPendingApproval,
    RedirectHome,
    RedirectForbidden,
    Defer,
}

/// Pure access decision. First matching rule wins:
///
/// 1. unauthenticated + protected target      -> RedirectLogin
/// 2. unauthenticated + public target         -> Allow
/// 3. profile not loaded (any target)         -> Defer
/// 4. not approved, target != pending page    -> RedirectPendingApproval
/// 5. not approved, target == pending page    -> Allow
/// 6. approved, target == pending page        -> RedirectHome
/// 7. approved, public target (login/register)-> RedirectHome
/// 8. approved, protected target              -> route table verdict
///
/// No side effects and no hidden state: the guard may re-run this any number
/// of times for the same pending navigation and always gets the same answer.
pub fn decide(ctx: &AccessContext<'_>) -> AccessDecision {
    if !ctx.authenticated {
        return if ctx.public {
            AccessDecision::Allow
        } else {
            AccessDecision::RedirectLogin
        };
    }

    if !ctx.profile_loaded {
        // Covers both protected and public targets: until approval status is
        // known, any redirect would be premature.
        return AccessDecision::Defer;
    }

    if !ctx.approved {
        return if ctx.path == PENDING_APPROVAL_PATH {
            AccessDecision::Allow
        } else {
            AccessDecision::RedirectPendingApproval
        };
    }

    if ctx.path == PENDING_APPROVAL_PATH {
        return AccessDecision::RedirectHome;
    }

    if ctx.public {
        // Approved actors have no business on the login/register pages.
        return AccessDecision::RedirectHome;
    }

    if can_access_route(ctx.role, ctx.path) {
        AccessDecision::Allow
    } else {
        AccessDecision::RedirectForbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(path: &str) -> AccessContext<'_> {
        AccessContext {
            authenticated: true,
            profile_loaded: true,
            approved: true,
            role: Some(Role::Teacher),
            path,
            public: false,
        }
    }

    #[test]
    fn unauthenticated_protected_always_redirects_to_login() {
        // Regardless of what the rest of the context claims.
        let mut c = ctx("/students");
        c.authenticated = false;
        c.profile_loaded = false;
        c.approved = false;
        c.role = None;
        assert_eq!(decide(&c), AccessDecision::RedirectLogin);
    }

    #[test]
    fn loading_profile_defers_without_redirecting() {
        let mut c = ctx("/students");
        c.profile_loaded = false;
        c.approved = false;
        assert_eq!(decide(&c), AccessDecision::Defer);

        let mut c = AccessContext {
            public: true,
            ..ctx("/auth/login")
        };
        c.profile_loaded = false;
        assert_eq!(decide(&c), AccessDecision::Defer);
    }

    #[test]
    fn unapproved_actor_is_pinned_to_pending_page() {
        let mut c = ctx("/students");
        c.approved = false;
        assert_eq!(decide(&c), AccessDecision::RedirectPendingApproval);

        let mut c = ctx(PENDING_APPROVAL_PATH);
        c.approved = false;
        assert_eq!(decide(&c), AccessDecision::Allow);
    }

    #[test]
    fn approved_actor_bounces_off_pending_and_public_pages() {
        assert_eq!(decide(&ctx(PENDING_APPROVAL_PATH)), AccessDecision::RedirectHome);

        let c = AccessContext {
            public: true,
            ..ctx("/auth/login")
        };
        assert_eq!(decide(&c), AccessDecision::RedirectHome);
    }
}
