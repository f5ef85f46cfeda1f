use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use super::storage::{SessionStore, TOKEN_KEY, USER_KEY};
use crate::api::{ApiClient, ApiError};
use crate::models::{LoginCredentials, LoginResponse, ManagerProfile, Role};
use crate::navigation::{Navigator, RouteName};

/// Shown in place of the user's name when no profile is loaded.
pub const DISPLAY_NAME_FALLBACK: &str = "User";

/// Page opened after a successful login.
pub const POST_LOGIN_ROUTE: RouteName = RouteName::Leads;

/// Token and profile as currently known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub token: Option<String>,
    pub user: Option<ManagerProfile>,
}

impl SessionData {
    /// Logged in means a non-empty token *and* a profile.
    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty()) && self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin())
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.full_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DISPLAY_NAME_FALLBACK)
            .to_string()
    }
}

/// The single source of truth for who is logged in.
///
/// Created once at startup and shared (`Arc<Session>`) with the HTTP client
/// middleware and whoever drives navigation. Every mutation goes through
/// here so memory and durable storage stay in step.
pub struct Session {
    store: Box<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    data: RwLock<SessionData>,
}

impl Session {
    /// Restore the session from durable storage. Missing, unreadable or
    /// corrupt entries leave the corresponding field empty.
    pub fn initialize(store: Box<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        let token = Self::read_entry(store.as_ref(), TOKEN_KEY)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let user = Self::read_entry(store.as_ref(), USER_KEY).and_then(|raw| {
            match serde_json::from_str::<Option<ManagerProfile>>(&raw) {
                Ok(profile) => profile,
                Err(e) => {
                    warn!(error = %e, "Stored profile is corrupt, ignoring it");
                    None
                }
            }
        });

        debug!(has_token = token.is_some(), has_user = user.is_some(), "Session initialized");

        Self {
            store,
            navigator,
            data: RwLock::new(SessionData { token, user }),
        }
    }

    fn read_entry(store: &dyn SessionStore, key: &str) -> Option<String> {
        match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read session storage");
                None
            }
        }
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Copy of the current state, for decisions that need a consistent view.
    pub fn snapshot(&self) -> SessionData {
        self.data.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.data.read().token.clone()
    }

    pub fn user(&self) -> Option<ManagerProfile> {
        self.data.read().user.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.data.read().role()
    }

    pub fn is_logged_in(&self) -> bool {
        self.data.read().is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.data.read().is_admin()
    }

    pub fn display_name(&self) -> String {
        self.data.read().display_name()
    }

    /// Exchange credentials for a token and profile.
    ///
    /// On failure the session is left as it was and the error is returned
    /// for display.
    pub async fn login(
        &self,
        api: &ApiClient,
        credentials: &LoginCredentials,
    ) -> Result<ManagerProfile, ApiError> {
        let LoginResponse {
            access_token, user, ..
        } = match api.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                error!(username = %credentials.username, error = %e, "Login failed");
                return Err(e);
            }
        };

        {
            let mut data = self.data.write();
            data.token = Some(access_token.clone());
            data.user = Some(user.clone());
        }

        self.persist(TOKEN_KEY, &access_token);
        self.persist_profile(&user);

        info!(username = %user.username, role = %user.role, "Login successful");
        self.navigator.push(POST_LOGIN_ROUTE);
        Ok(user)
    }

    /// Forget the token and profile, in memory and on disk, and head to the
    /// login page. Safe to call when already logged out.
    pub fn logout(&self) {
        let was_logged_in = {
            let mut data = self.data.write();
            let was_logged_in = data.is_logged_in();
            *data = SessionData::default();
            was_logged_in
        };

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to clear session storage");
            }
        }

        if was_logged_in {
            info!("Logged out");
        } else {
            debug!("Logout requested with no active session");
        }
        self.navigator.push(RouteName::Login);
    }

    /// Refresh the cached profile from the server. Failures are logged and
    /// otherwise ignored; the token is never touched.
    pub async fn fetch_profile(&self, api: &ApiClient) {
        if !self.is_logged_in() {
            return;
        }

        match api.current_profile().await {
            Ok(profile) => {
                let applied = {
                    let mut data = self.data.write();
                    if data.token.is_some() {
                        data.user = Some(profile.clone());
                        true
                    } else {
                        false
                    }
                };

                if applied {
                    self.persist_profile(&profile);
                    debug!(username = %profile.username, "Profile refreshed");
                } else {
                    debug!("Session ended while the profile was loading, discarding it");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch user data");
            }
        }
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "Failed to save session");
        }
    }

    fn persist_profile(&self, profile: &ManagerProfile) {
        match serde_json::to_string(profile) {
            Ok(json) => self.persist(USER_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize profile"),
        }
    }
}
