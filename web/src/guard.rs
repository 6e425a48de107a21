//! Navigation guard decisions.
//!
//! A pure function so the routing policy is testable without a router:
//! given the target path, whether the route requires authentication, and the
//! current authentication flag, decide what the transition should do. The
//! health-check page bypasses every check unconditionally.

/// Routes reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &["/login", "/register", "/forgot-password", "/health"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavDecision {
    /// Proceed to the requested route.
    Allow,
    /// Send an unauthenticated user to login, keeping the original path so
    /// login can return there.
    ToLogin { redirect: String },
    /// Send an authenticated user away from the auth pages.
    ToHome,
}

fn bare_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

/// Whether a path needs a session.
pub fn requires_auth(path: &str) -> bool {
    let bare = bare_path(path);
    !PUBLIC_PATHS.contains(&bare)
}

/// Decide what a route transition should do.
pub fn decide(path: &str, requires_auth: bool, authenticated: bool) -> NavDecision {
    let bare = bare_path(path);

    // the status page is reachable no matter what
    if bare == "/health" {
        return NavDecision::Allow;
    }

    if requires_auth && !authenticated {
        return NavDecision::ToLogin {
            redirect: path.to_string(),
        };
    }

    if authenticated && (bare == "/login" || bare == "/register") {
        return NavDecision::ToHome;
    }

    NavDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_protected_route_redirects_to_login() {
        let decision = decide("/medical-records", true, false);
        assert_eq!(
            decision,
            NavDecision::ToLogin {
                redirect: "/medical-records".to_string()
            }
        );
    }

    #[test]
    fn test_redirect_keeps_full_path() {
        let decision = decide("/physical-exams/3/report", true, false);
        assert_eq!(
            decision,
            NavDecision::ToLogin {
                redirect: "/physical-exams/3/report".to_string()
            }
        );
    }

    #[test]
    fn test_health_page_always_allowed() {
        assert_eq!(decide("/health", true, false), NavDecision::Allow);
        assert_eq!(decide("/health", false, true), NavDecision::Allow);
    }

    #[test]
    fn test_authenticated_user_leaves_auth_pages() {
        assert_eq!(decide("/login", false, true), NavDecision::ToHome);
        assert_eq!(decide("/register", false, true), NavDecision::ToHome);
    }

    #[test]
    fn test_authenticated_user_passes_protected_routes() {
        assert_eq!(decide("/", true, true), NavDecision::Allow);
        assert_eq!(decide("/settings", true, true), NavDecision::Allow);
    }

    #[test]
    fn test_unauthenticated_user_may_visit_login() {
        assert_eq!(decide("/login", false, false), NavDecision::Allow);
    }

    #[test]
    fn test_requires_auth_classification() {
        assert!(requires_auth("/"));
        assert!(requires_auth("/medical-records"));
        assert!(!requires_auth("/login"));
        assert!(!requires_auth("/login?redirect=/settings"));
        assert!(!requires_auth("/health"));
    }
}
