//! Navigation requests and the router that applies them.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::guard::{evaluate, Decision};
use super::routes::{resolve, RouteMatch, RouteName};
use crate::auth::SessionData;

/// Guard redirects followed before giving up on a transition.
const MAX_REDIRECTS: usize = 5;

/// Receiver for navigation side effects raised by the session and the HTTP
/// client.
pub trait Navigator: Send + Sync {
    /// Client-side transition to a named route.
    fn push(&self, route: RouteName);

    /// Full reload at `path`; everything held in memory is discarded.
    fn hard_redirect(&self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    Push(RouteName),
    Reload(String),
}

/// Records navigation requests in the order they were made.
#[derive(Debug, Default)]
pub struct History {
    pending: Mutex<Vec<NavigationRequest>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests made since the last drain, oldest first.
    pub fn pending(&self) -> Vec<NavigationRequest> {
        self.pending.lock().clone()
    }

    pub fn take_pending(&self) -> Vec<NavigationRequest> {
        std::mem::take(&mut *self.pending.lock())
    }
}

impl Navigator for History {
    fn push(&self, route: RouteName) {
        debug!(%route, "Navigation requested");
        self.pending.lock().push(NavigationRequest::Push(route));
    }

    fn hard_redirect(&self, path: &str) {
        debug!(path, "Hard redirect requested");
        self.pending.lock().push(NavigationRequest::Reload(path.to_string()));
    }
}

/// Outcome of one navigation attempt.
#[derive(Debug, Clone)]
pub struct Transition {
    pub location: RouteMatch,
    /// Routes the guard redirected through, in order.
    pub redirects: Vec<RouteName>,
    /// Set when the transition came from a hard redirect.
    pub reload: bool,
}

impl Transition {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }

    pub fn name(&self) -> RouteName {
        self.location.name()
    }
}

/// Applies navigation through the guard and tracks the current location.
pub struct Router {
    history: Arc<History>,
    current: Mutex<Option<RouteMatch>>,
}

impl Router {
    pub fn new(history: Arc<History>) -> Self {
        Self {
            history,
            current: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Option<RouteMatch> {
        self.current.lock().clone()
    }

    /// Navigate to `path`, following guard redirects until a page allows entry.
    pub fn navigate(&self, path: &str, session: &SessionData) -> Transition {
        let mut location = resolve(path);
        let mut redirects = Vec::new();

        while let Decision::Redirect(target) = evaluate(location.route, session) {
            if redirects.len() >= MAX_REDIRECTS {
                warn!(path, ?redirects, "Too many redirects, stopping");
                break;
            }
            redirects.push(target);
            location = resolve(target.path());
        }

        debug!(requested = path, location = %location.path, ?redirects, "Navigated");
        *self.current.lock() = Some(location.clone());

        Transition {
            location,
            redirects,
            reload: false,
        }
    }

    /// Apply every pending navigation request in order.
    pub fn process_pending(&self, session: &SessionData) -> Vec<Transition> {
        self.history
            .take_pending()
            .into_iter()
            .map(|request| match request {
                NavigationRequest::Push(route) => self.navigate(route.path(), session),
                NavigationRequest::Reload(path) => {
                    self.current.lock().take();
                    let mut transition = self.navigate(&path, session);
                    transition.reload = true;
                    transition
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ManagerProfile, Role};

    fn manager_session() -> SessionData {
        SessionData {
            token: Some("tok".to_string()),
            user: Some(ManagerProfile {
                id: 3,
                username: "anna".to_string(),
                role: Role::Manager,
                full_name: "Anna K".to_string(),
                is_active: true,
                created_at: None,
                projects: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_history_records_in_order() {
        let history = History::new();
        history.push(RouteName::Leads);
        history.hard_redirect("/login");

        assert_eq!(
            history.take_pending(),
            vec![
                NavigationRequest::Push(RouteName::Leads),
                NavigationRequest::Reload("/login".to_string())
            ]
        );
        assert!(history.pending().is_empty());
    }

    #[test]
    fn test_navigate_logged_out_lands_on_login() {
        let router = Router::new(Arc::new(History::new()));
        let t = router.navigate("/leads", &SessionData::default());
        assert_eq!(t.name(), RouteName::Login);
        assert_eq!(t.redirects, vec![RouteName::Login]);
        assert_eq!(router.current().map(|m| m.name()), Some(RouteName::Login));
    }

    #[test]
    fn test_manager_bounced_from_admin_page() {
        let router = Router::new(Arc::new(History::new()));
        let t = router.navigate("/admin/managers", &manager_session());
        assert_eq!(t.name(), RouteName::Dashboard);
        assert!(t.was_redirected());
    }

    #[test]
    fn test_process_pending_applies_reload() {
        let history = Arc::new(History::new());
        let router = Router::new(history.clone());
        router.navigate("/leads/5", &manager_session());

        history.hard_redirect("/login");
        let transitions = router.process_pending(&SessionData::default());

        assert_eq!(transitions.len(), 1);
        assert!(transitions[0].reload);
        assert_eq!(transitions[0].name(), RouteName::Login);
        assert!(history.pending().is_empty());
    }
}
