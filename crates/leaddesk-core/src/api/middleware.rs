//! Hooks run around every API call.
//!
//! Request middleware may edit the outgoing request (or refuse it).
//! Response middleware are notified of the outcome but cannot alter it.

use std::sync::Arc;

use reqwest::{header, Method, Request, StatusCode};
use tracing::{debug, error};

use super::client::LOGIN_PATH;
use super::ApiError;
use crate::auth::Session;
use crate::navigation::RouteName;

/// What a response hook knows about the originating request.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    /// Endpoint path relative to the base URL, without the query string.
    pub path: String,
}

pub trait RequestMiddleware: Send + Sync {
    fn before_request(&self, request: &mut Request) -> Result<(), ApiError>;
}

pub trait ResponseMiddleware: Send + Sync {
    fn on_response(&self, _info: &RequestInfo, _status: StatusCode) {}

    fn on_error(&self, _info: &RequestInfo, _error: &ApiError) {}
}

/// Attaches `Authorization: Bearer <token>` when the session holds a token.
/// Requests without a token go out unauthenticated.
pub struct BearerAuth {
    session: Arc<Session>,
}

impl BearerAuth {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

impl RequestMiddleware for BearerAuth {
    fn before_request(&self, request: &mut Request) -> Result<(), ApiError> {
        if let Some(token) = self.session.token().filter(|t| !t.is_empty()) {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            request.headers_mut().insert(header::AUTHORIZATION, value);
        }
        Ok(())
    }
}

/// Ends the session when the server rejects our credentials.
///
/// A 401 from the login endpoint is a wrong password and passes through;
/// a 401 anywhere else logs out and forces a full reload of the login page.
pub struct LogoutOnUnauthorized {
    session: Arc<Session>,
}

impl LogoutOnUnauthorized {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

impl ResponseMiddleware for LogoutOnUnauthorized {
    fn on_error(&self, info: &RequestInfo, error: &ApiError) {
        if !error.is_unauthorized() || info.path == LOGIN_PATH {
            return;
        }

        error!(method = %info.method, path = %info.path, "Unauthorized access (401). Logging out.");
        self.session.logout();
        self.session
            .navigator()
            .hard_redirect(RouteName::Login.path());
    }
}

/// Debug-level trace of every call and its outcome.
pub struct TraceRequests;

impl ResponseMiddleware for TraceRequests {
    fn on_response(&self, info: &RequestInfo, status: StatusCode) {
        debug!(method = %info.method, path = %info.path, status = status.as_u16(), "API request completed");
    }

    fn on_error(&self, info: &RequestInfo, error: &ApiError) {
        debug!(method = %info.method, path = %info.path, status = ?error.status(), error = %error, "API request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::auth::{MemoryStore, SessionStore, TOKEN_KEY, USER_KEY};
    use crate::navigation::{History, NavigationRequest};
    use parking_lot::Mutex;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROFILE_JSON: &str = r#"{"id": 1, "username": "root", "role": "admin",
        "full_name": "Root", "is_active": true}"#;

    fn logged_in_session() -> (Arc<Session>, Arc<History>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, PROFILE_JSON)]));
        let history = Arc::new(History::new());
        let session = Arc::new(Session::initialize(Box::new(store.clone()), history.clone()));
        (session, history, store)
    }

    fn client(server: &MockServer, session: &Arc<Session>) -> ApiClient {
        ApiClient::new(&format!("{}/api", server.uri()))
            .expect("client builds")
            .with_session(session.clone())
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let (session, _, _) = logged_in_session();
        let leads = client(&server, &session).leads(None).await.expect("request succeeds");
        assert!(leads.is_empty());
    }

    #[tokio::test]
    async fn test_no_token_goes_out_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let session = Arc::new(Session::initialize(Box::new(MemoryStore::new()), Arc::new(History::new())));
        client(&server, &session).leads(None).await.expect("request succeeds");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_logs_out_and_redirects_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads/4"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({"detail": "Could not validate credentials"})))
            .mount(&server)
            .await;

        let (session, history, store) = logged_in_session();
        let err = client(&server, &session).lead(4).await.expect_err("401 propagates");

        assert!(err.is_unauthorized());
        assert!(!session.is_logged_in());
        assert!(store.get(TOKEN_KEY).expect("get").is_none());
        assert!(store.get(USER_KEY).expect("get").is_none());
        assert_eq!(
            history.take_pending(),
            vec![
                NavigationRequest::Push(RouteName::Login),
                NavigationRequest::Reload("/login".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_late_unauthorized_after_logout_stays_logged_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/messages/4"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let (session, history, store) = logged_in_session();
        let api = client(&server, &session);

        session.logout();
        assert_eq!(history.take_pending(), vec![NavigationRequest::Push(RouteName::Login)]);

        let err = api.messages(4).await.expect_err("401 propagates");
        assert!(err.is_unauthorized());

        assert!(!session.is_logged_in());
        assert!(session.token().is_none());
        assert!(store.get(TOKEN_KEY).expect("get").is_none());
        assert!(store.get(USER_KEY).expect("get").is_none());
        assert_eq!(
            history.take_pending(),
            vec![
                NavigationRequest::Push(RouteName::Login),
                NavigationRequest::Reload("/login".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_stored_token_with_newline_still_authenticates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::with_entries([(TOKEN_KEY, "tok\r\n"), (USER_KEY, PROFILE_JSON)]);
        let session = Arc::new(Session::initialize(Box::new(store), Arc::new(History::new())));
        client(&server, &session).leads(None).await.expect("request succeeds");
    }

    #[tokio::test]
    async fn test_other_errors_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads/4"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({"detail": "Access denied"})))
            .mount(&server)
            .await;

        let (session, history, _) = logged_in_session();
        let err = client(&server, &session).lead(4).await.expect_err("403 propagates");

        assert!(matches!(err, ApiError::AccessDenied(_)));
        assert!(session.is_logged_in());
        assert!(history.pending().is_empty());
    }

    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl RequestMiddleware for Recorder {
        fn before_request(&self, request: &mut Request) -> Result<(), ApiError> {
            self.seen.lock().push(request.url().path().to_string());
            request
                .headers_mut()
                .insert("x-client", reqwest::header::HeaderValue::from_static("leaddesk"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_custom_request_middleware_runs_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats/overview"))
            .and(header("x-client", "leaddesk"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_leads": 1, "active_leads": 1, "closed_leads": 0,
                "total_messages": 3, "managers_count": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let recorder = Arc::new(Recorder { seen: Mutex::new(Vec::new()) });
        let (session, _, _) = logged_in_session();
        let api = client(&server, &session).with_request_middleware(recorder.clone());

        let stats = api.overview_stats().await.expect("request succeeds");
        assert_eq!(stats.total_messages, 3);
        assert_eq!(recorder.seen.lock().as_slice(), ["/api/stats/overview"]);
    }
}
