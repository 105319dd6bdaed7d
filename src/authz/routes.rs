use std::sync::LazyLock;

use super::role::Role;

/// Well-known paths the guard redirects to (or treats specially).
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PENDING_APPROVAL_PATH: &str = "/auth/pending-approval";
pub const HOME_PATH: &str = "/";
pub const FORBIDDEN_PATH: &str = "/403";

/// One entry of the route permission table: either an exact path or a
/// `<prefix>/*` pattern covering every descendant of that prefix (but never
/// the bare prefix itself).
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub pattern: &'static str,
    pub allowed: Vec<Role>,
}

fn rule(pattern: &'static str, allowed: Vec<Role>) -> RouteRule {
    RouteRule { pattern, allowed }
}

fn with_admin(mut roles: Vec<Role>) -> Vec<Role> {
    if !roles.iter().any(|r| r.is_admin()) {
        roles.push(Role::Superadmin);
    }
    roles
}

/// The route permission table. Ordered; consulted exact-match first, then by
/// longest `/*` prefix with declaration order breaking ties.
///
/// A path matching no entry is implicitly open to any authenticated,
/// approved actor. That default-allow posture is intentional and means every
/// new restricted surface must be declared here explicitly.
///
/// Note the two student namespaces: `/students` belongs to the teaching side
/// while `/sales/students` is the sales-side view; they are distinct on
/// purpose.
static ROUTE_RULES: LazyLock<Vec<RouteRule>> = LazyLock::new(|| {
    let admin_only = vec![Role::Superadmin];
    let teaching = with_admin(Role::teaching_staff());
    let sales = with_admin(Role::sales_staff());
    let management = Role::management();

    vec![
        rule("/users", admin_only.clone()),
        rule("/users/*", admin_only.clone()),
        rule("/students", teaching.clone()),
        rule("/students/*", teaching.clone()),
        rule("/lessons", teaching.clone()),
        rule("/lessons/*", teaching.clone()),
        rule("/evaluations", teaching.clone()),
        rule("/evaluations/*", teaching),
        rule("/leads", sales.clone()),
        rule("/leads/*", sales),
        rule("/reports", management.clone()),
        rule("/reports/*", management.clone()),
        rule("/settings", management.clone()),
        rule("/settings/*", management),
        rule("/sales", Role::sales_staff()),
        rule("/sales/*", Role::sales_staff()),
        rule("/tariffs", admin_only),
    ]
});

/// Routes reachable without authentication.
pub fn is_public_route(path: &str) -> bool {
    path == LOGIN_PATH || path == REGISTER_PATH
}

/// Look up the allowed-role set for a path.
///
/// Exact entries win outright. Otherwise the `<prefix>/*` entries are
/// considered for paths strictly below the prefix, most specific (longest)
/// prefix first; among equal lengths the earliest declaration wins. `None`
/// means the path is unlisted.
pub fn resolve_permission(path: &str) -> Option<&'static [Role]> {
    let rules: &'static Vec<RouteRule> = &ROUTE_RULES;

    if let Some(exact) = rules.iter().find(|r| r.pattern == path) {
        return Some(&exact.allowed);
    }

    let mut best: Option<(&'static RouteRule, usize)> = None;
    for r in rules {
        let Some(prefix) = r.pattern.strip_suffix("/*") else {
            continue;
        };
        // "/users/*" covers "/users/123" but not "/users" or "/usersX".
        if path.starts_with(prefix) && path[prefix.len()..].starts_with('/') {
            match best {
                Some((_, len)) if prefix.len() <= len => {}
                _ => best = Some((r, prefix.len())),
            }
        }
    }

    best.map(|(r, _)| r.allowed.as_slice())
}

/// Whether `role` may enter `path`. Only meaningful for paths that require
/// authentication; an absent role is always refused (the caller redirects to
/// login).
///
/// The superadmin passes every declared entry regardless of its role list,
/// and unlisted paths are open to everyone who gets this far.
pub fn can_access_route(role: Option<Role>, path: &str) -> bool {
    let Some(role) = role else {
        return false;
    };
    if role.is_admin() {
        return true;
    }
    match resolve_permission(path) {
        None => true,
        Some(allowed) => allowed.contains(&role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_beats_prefix() {
        assert_eq!(
            resolve_permission("/users"),
            Some(&[Role::Superadmin][..])
        );
    }

    #[test]
    fn wildcard_never_matches_bare_prefix() {
        // "/tariffs" has an exact entry only; "/tariffs/history" is unlisted.
        assert!(resolve_permission("/tariffs").is_some());
        assert!(resolve_permission("/tariffs/history").is_none());
    }

    #[test]
    fn longest_prefix_wins() {
        // "/sales/students" is below "/sales/*" only; a deeper declared
        // prefix would shadow it.
        let allowed = resolve_permission("/sales/students").unwrap();
        assert_eq!(allowed, Role::sales_staff().as_slice());
    }

    #[test]
    fn unlisted_paths_default_allow() {
        assert!(can_access_route(Some(Role::Teacher), "/dashboard"));
        assert!(!can_access_route(None, "/dashboard"));
    }

    #[test]
    fn admin_override_ignores_declared_lists() {
        // "/sales" does not list the superadmin, but the override applies.
        assert!(can_access_route(Some(Role::Superadmin), "/sales"));
        assert!(!can_access_route(Some(Role::Teacher), "/sales"));
    }
}
