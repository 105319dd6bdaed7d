use tutorium::authz::routes::{LOGIN_PATH, PENDING_APPROVAL_PATH, is_public_route};
use tutorium::authz::{AccessContext, AccessDecision, Role, decide};

fn ctx(path: &str) -> AccessContext<'_> {
    AccessContext {
        authenticated: true,
        profile_loaded: true,
        approved: true,
        role: Some(Role::Teacher),
        path,
        public: is_public_route(path),
    }
}

#[test]
fn unauthenticated_protected_target_always_redirects_to_login() {
    // The other fields must not matter.
    for (loaded, approved, role) in [
        (false, false, None),
        (true, true, Some(Role::Superadmin)),
        (true, false, Some(Role::Sales)),
    ] {
        let c = AccessContext {
            authenticated: false,
            profile_loaded: loaded,
            approved,
            role,
            path: "/students",
            public: false,
        };
        assert_eq!(decide(&c), AccessDecision::RedirectLogin);
    }
}

#[test]
fn unauthenticated_public_target_is_allowed() {
    let c = AccessContext {
        authenticated: false,
        profile_loaded: false,
        approved: false,
        role: None,
        path: LOGIN_PATH,
        public: true,
    };
    assert_eq!(decide(&c), AccessDecision::Allow);
}

#[test]
fn pending_profile_defers_on_protected_and_public_targets() {
    let mut c = ctx("/students");
    c.profile_loaded = false;
    c.approved = false;
    c.role = None;
    assert_eq!(decide(&c), AccessDecision::Defer);

    let mut c = ctx(LOGIN_PATH);
    c.profile_loaded = false;
    c.approved = false;
    c.role = None;
    assert_eq!(decide(&c), AccessDecision::Defer);
}

#[test]
fn approval_gating() {
    let mut c = ctx("/students");
    c.approved = false;
    assert_eq!(decide(&c), AccessDecision::RedirectPendingApproval);

    let mut c = ctx(PENDING_APPROVAL_PATH);
    c.approved = false;
    assert_eq!(decide(&c), AccessDecision::Allow);
}

#[test]
fn approved_actor_bounces_off_pending_page() {
    assert_eq!(
        decide(&ctx(PENDING_APPROVAL_PATH)),
        AccessDecision::RedirectHome
    );
}

#[test]
fn approved_actor_bounces_off_public_pages() {
    assert_eq!(decide(&ctx(LOGIN_PATH)), AccessDecision::RedirectHome);

    // Unapproved actors get sent to the pending page instead.
    let mut c = ctx(LOGIN_PATH);
    c.approved = false;
    assert_eq!(decide(&c), AccessDecision::RedirectPendingApproval);
}

#[test]
fn sales_is_forbidden_on_the_teaching_student_namespace() {
    // /students admits teaching staff and the superadmin; an approved sales
    // actor ends up on the forbidden page, not the student list.
    let mut c = ctx("/students");
    c.role = Some(Role::Sales);
    assert_eq!(decide(&c), AccessDecision::RedirectForbidden);

    // The sales-side namespace is theirs.
    let mut c = ctx("/sales/students");
    c.role = Some(Role::Sales);
    assert_eq!(decide(&c), AccessDecision::Allow);
}

#[test]
fn superadmin_is_allowed_everywhere() {
    for path in [
        "/users",
        "/students",
        "/lessons",
        "/evaluations",
        "/leads",
        "/reports",
        "/settings",
        "/sales",
        "/tariffs",
        "/unlisted",
        "/",
    ] {
        let mut c = ctx(path);
        c.role = Some(Role::Superadmin);
        assert_eq!(decide(&c), AccessDecision::Allow, "path {path}");
    }
}

#[test]
fn decision_is_idempotent() {
    let c = ctx("/students");
    let first = decide(&c);
    for _ in 0..10 {
        assert_eq!(decide(&c), first);
    }
}
