//! Navigation guard: a pure decision over (path, session).
//!
//! Every route transition is classified against the latest session snapshot.
//! The decision is a value, not a cached judgement: callers re-run
//! [`decide`] whenever the path or the session changes (the session store's
//! action broadcast signals the latter), so a decision computed against a
//! stale session can never apply after a newer one exists.

use crate::session::SessionState;

/// Path of the login form
pub const LOGIN_PATH: &str = "/login";
/// Path of the registration form
pub const REGISTRATION_PATH: &str = "/registration";
/// Path of the home view (available rooms)
pub const HOME_PATH: &str = "/";
/// Path of the user-only reservation history view
pub const HISTORY_PATH: &str = "/history";

/// The paths an anonymous visitor may see
pub const PUBLIC_PATHS: [&str; 2] = [LOGIN_PATH, REGISTRATION_PATH];

/// Returns true for the paths an anonymous visitor may see
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// What the router should do with the current transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session is still resolving: render nothing. Protected content
    /// must not flash, and redirecting now would guess wrong half the time.
    Wait,
    /// Send the visitor elsewhere
    Redirect(&'static str),
    /// Render the requested route
    Allow,
}

/// Classifies a route transition against the current session
///
/// The rules, in dominance order:
///
/// 1. A resolving session always waits.
/// 2. Anonymous visitors only see the public paths; everything else
///    redirects to the login form.
/// 3. Signed-in users have no business on the public paths; those redirect
///    home.
/// 4. Administrators have no personal history; `/history` redirects home.
/// 5. Everything else is allowed.
///
/// For a resolved session, rules 2–4 are mutually exclusive: exactly one
/// arm fires for any (path, session) pair.
#[must_use]
pub fn decide(path: &str, session: &SessionState) -> RouteDecision {
    if session.resolving {
        return RouteDecision::Wait;
    }

    match &session.identity {
        None => {
            if is_public_path(path) {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect(LOGIN_PATH)
            }
        }
        Some(profile) => {
            if is_public_path(path) {
                return RouteDecision::Redirect(HOME_PATH);
            }
            if profile.role.is_admin() && path == HISTORY_PATH {
                return RouteDecision::Redirect(HOME_PATH);
            }
            RouteDecision::Allow
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use roombook_api::{UserId, UserProfile, UserRole};

    fn resolving_session() -> SessionState {
        SessionState::new()
    }

    fn anonymous_session() -> SessionState {
        let mut session = SessionState::new();
        session.resolving = false;
        session
    }

    fn session_with_role(role: UserRole) -> SessionState {
        let mut session = SessionState::new();
        session.resolving = false;
        session.identity = Some(UserProfile {
            id: UserId::new(),
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            role,
            created_at: Utc::now(),
        });
        session
    }

    #[test]
    fn resolving_session_waits_everywhere() {
        for path in ["/", "/login", "/registration", "/history", "/anything"] {
            assert_eq!(decide(path, &resolving_session()), RouteDecision::Wait);
        }
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login_from_protected_paths() {
        let session = anonymous_session();

        assert_eq!(decide("/", &session), RouteDecision::Redirect(LOGIN_PATH));
        assert_eq!(
            decide("/history", &session),
            RouteDecision::Redirect(LOGIN_PATH)
        );

        assert_eq!(decide("/login", &session), RouteDecision::Allow);
        assert_eq!(decide("/registration", &session), RouteDecision::Allow);
    }

    #[test]
    fn signed_in_user_leaves_public_paths() {
        let session = session_with_role(UserRole::User);

        assert_eq!(decide("/login", &session), RouteDecision::Redirect(HOME_PATH));
        assert_eq!(
            decide("/registration", &session),
            RouteDecision::Redirect(HOME_PATH)
        );
    }

    #[test]
    fn user_may_visit_history() {
        let session = session_with_role(UserRole::User);
        assert_eq!(decide("/history", &session), RouteDecision::Allow);
        assert_eq!(decide("/", &session), RouteDecision::Allow);
    }

    #[test]
    fn admin_is_redirected_away_from_history_only() {
        let session = session_with_role(UserRole::Admin);

        assert_eq!(
            decide("/history", &session),
            RouteDecision::Redirect(HOME_PATH)
        );
        assert_eq!(decide("/", &session), RouteDecision::Allow);
    }

    proptest! {
        /// Rule 1 dominates: while resolving, no path and no identity can
        /// produce anything but Wait.
        #[test]
        fn any_path_waits_while_resolving(path in "\\PC*") {
            prop_assert_eq!(decide(&path, &resolving_session()), RouteDecision::Wait);

            let mut session = session_with_role(UserRole::Admin);
            session.resolving = true;
            prop_assert_eq!(decide(&path, &session), RouteDecision::Wait);
        }

        /// Every non-public path redirects an anonymous visitor to login.
        #[test]
        fn any_protected_path_redirects_anonymous_visitors(path in "\\PC*") {
            prop_assume!(!is_public_path(&path));
            prop_assert_eq!(
                decide(&path, &anonymous_session()),
                RouteDecision::Redirect(LOGIN_PATH)
            );
        }

        /// A resolved session always yields exactly one of Allow/Redirect,
        /// never Wait.
        #[test]
        fn resolved_sessions_never_wait(path in "\\PC*") {
            for session in [
                anonymous_session(),
                session_with_role(UserRole::User),
                session_with_role(UserRole::Admin),
            ] {
                prop_assert_ne!(decide(&path, &session), RouteDecision::Wait);
            }
        }
    }
}
