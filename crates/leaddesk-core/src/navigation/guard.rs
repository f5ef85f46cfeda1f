//! Access rules evaluated before every page transition.

use tracing::warn;

use super::routes::{RouteDescriptor, RouteName};
use crate::auth::SessionData;

/// Where a navigation attempt ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(RouteName),
}

/// Decide whether `destination` may be entered with the given session.
///
/// Rules are checked in order and the first match wins:
/// 1. the login page while logged in goes to the dashboard;
/// 2. an auth-only page while logged out goes to login;
/// 3. a role-restricted page while logged in needs one of its roles,
///    otherwise the user is bounced to the dashboard;
/// 4. everything else is allowed.
pub fn evaluate(destination: &RouteDescriptor, session: &SessionData) -> Decision {
    let logged_in = session.is_logged_in();

    if destination.name == RouteName::Login && logged_in {
        return Decision::Redirect(RouteName::Dashboard);
    }

    if destination.requires_auth && !logged_in {
        return Decision::Redirect(RouteName::Login);
    }

    if destination.roles.is_some() && logged_in {
        if destination.allows_role(session.role()) {
            return Decision::Allow;
        }
        warn!(route = %destination.name, role = ?session.role(), "Access denied. Missing required role.");
        return Decision::Redirect(RouteName::Dashboard);
    }

    Decision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ManagerProfile, Role};
    use crate::navigation::routes::{RouteDescriptor, ROUTES};

    fn profile(role: Role) -> ManagerProfile {
        ManagerProfile {
            id: 1,
            username: "anna".to_string(),
            role,
            full_name: "Anna K".to_string(),
            is_active: true,
            created_at: None,
            projects: Vec::new(),
        }
    }

    fn logged_in(role: Role) -> SessionData {
        SessionData {
            token: Some("tok".to_string()),
            user: Some(profile(role)),
        }
    }

    #[test]
    fn test_login_while_logged_in_goes_to_dashboard() {
        let login = RouteName::Login.descriptor();
        assert_eq!(evaluate(login, &logged_in(Role::Manager)), Decision::Redirect(RouteName::Dashboard));
        assert_eq!(evaluate(login, &logged_in(Role::Admin)), Decision::Redirect(RouteName::Dashboard));
        assert_eq!(evaluate(login, &SessionData::default()), Decision::Allow);
    }

    #[test]
    fn test_login_rule_wins_over_role_rule() {
        // A login page that also declares roles must still redirect to the
        // dashboard rather than evaluate the role set.
        static ROLE_LOGIN: RouteDescriptor = RouteDescriptor {
            name: RouteName::Login,
            pattern: "/login",
            requires_auth: true,
            roles: Some(&[Role::Admin]),
        };
        assert_eq!(evaluate(&ROLE_LOGIN, &logged_in(Role::Manager)), Decision::Redirect(RouteName::Dashboard));
    }

    #[test]
    fn test_auth_routes_redirect_to_login_when_logged_out() {
        for route in ROUTES.iter().filter(|r| r.requires_auth) {
            assert_eq!(
                evaluate(route, &SessionData::default()),
                Decision::Redirect(RouteName::Login),
                "route {} should require login",
                route.name
            );
        }
    }

    #[test]
    fn test_token_without_profile_is_logged_out() {
        let half = SessionData {
            token: Some("tok".to_string()),
            user: None,
        };
        assert_eq!(evaluate(RouteName::Leads.descriptor(), &half), Decision::Redirect(RouteName::Login));

        let other_half = SessionData {
            token: None,
            user: Some(profile(Role::Admin)),
        };
        assert_eq!(evaluate(RouteName::Leads.descriptor(), &other_half), Decision::Redirect(RouteName::Login));
    }

    #[test]
    fn test_role_restricted_route() {
        let admin_page = RouteName::AdminManagers.descriptor();
        assert_eq!(evaluate(admin_page, &logged_in(Role::Admin)), Decision::Allow);
        assert_eq!(evaluate(admin_page, &logged_in(Role::Manager)), Decision::Redirect(RouteName::Dashboard));
        assert_eq!(evaluate(admin_page, &SessionData::default()), Decision::Redirect(RouteName::Login));
    }

    #[test]
    fn test_open_routes_allowed() {
        let not_found = crate::navigation::resolve("/nowhere");
        assert_eq!(evaluate(not_found.route, &SessionData::default()), Decision::Allow);
        assert_eq!(evaluate(RouteName::Leads.descriptor(), &logged_in(Role::Manager)), Decision::Allow);
    }
}
