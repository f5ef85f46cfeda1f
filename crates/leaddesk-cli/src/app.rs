//! Application wiring: configuration, session, HTTP client and router.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use leaddesk_core::auth::MemoryStore;
use leaddesk_core::navigation::{resolve, Transition};
use leaddesk_core::{ApiClient, Config, History, RouteName, Router, Session};

/// Everything a command needs.
pub struct App {
    pub config: Config,
    pub session: Arc<Session>,
    pub api: ApiClient,
    pub router: Router,
    pub json: bool,
}

impl App {
    pub fn new(config: Config, api_url: Option<String>, json: bool) -> Result<Self> {
        let history = Arc::new(History::new());

        let store = match config.open_store() {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Session storage unavailable, session will not persist");
                Box::new(MemoryStore::new())
            }
        };
        let session = Arc::new(Session::initialize(store, history.clone()));

        let base_url = api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| config.base_url());
        debug!(%base_url, "Using API");

        let api = ApiClient::with_timeout(&base_url, config.request_timeout())
            .context("Failed to create HTTP client")?
            .with_session(session.clone());

        Ok(Self {
            config,
            session,
            api,
            router: Router::new(history),
            json,
        })
    }

    /// Refresh the cached profile when a session was restored.
    pub async fn bootstrap(&self) {
        if self.session.token().is_some() {
            self.session.fetch_profile(&self.api).await;
        }
    }

    /// Enter the page at `path`, failing when the guard sends us elsewhere.
    pub fn enter(&self, path: &str) -> Result<Transition> {
        let transition = self.router.navigate(path, &self.session.snapshot());
        let wanted = resolve(path).name();

        if transition.name() == wanted {
            return Ok(transition);
        }

        match transition.name() {
            RouteName::Login => bail!("Not logged in. Run `leaddesk login` first."),
            RouteName::Dashboard if !self.session.is_admin() => {
                bail!("Access denied: {} is only available to admins.", path)
            }
            other => bail!("Cannot open {}: redirected to {}", path, other.path()),
        }
    }

    /// Apply navigation the session requested while the command ran.
    ///
    /// Fails when the session was forcibly reset to the login page.
    pub fn settle(&self) -> Result<Vec<Transition>> {
        let transitions = self.router.process_pending(&self.session.snapshot());
        if let Some(location) = self.router.current() {
            debug!(location = %location.path, route = %location.name(), "Navigation settled");
        }

        if transitions
            .iter()
            .any(|t| t.reload && t.name() == RouteName::Login)
        {
            bail!("Your session has expired. Run `leaddesk login` to sign in again.");
        }
        Ok(transitions)
    }
}
