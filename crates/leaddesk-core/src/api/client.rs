//! API client for communicating with the LeadDesk REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::middleware::{
    BearerAuth, LogoutOnUnauthorized, RequestInfo, RequestMiddleware, ResponseMiddleware,
    TraceRequests,
};
use super::ApiError;
use crate::auth::Session;
use crate::models::{LoginCredentials, LoginResponse, ManagerProfile};

// ============================================================================
// Constants
// ============================================================================

/// Used when neither the environment nor the config names a server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Login endpoint. A 401 from here means bad credentials, not an expired session.
pub const LOGIN_PATH: &str = "/auth/login";

/// Current user's profile.
pub const PROFILE_PATH: &str = "/managers/me";

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the LeadDesk backend.
/// Clone is cheap - reqwest::Client and the middleware are reference counted.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_middleware: Vec<Arc<dyn RequestMiddleware>>,
    response_middleware: Vec<Arc<dyn ResponseMiddleware>>,
}

impl ApiClient {
    /// Create a client with the default timeout and no middleware.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_middleware: Vec::new(),
            response_middleware: Vec::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append a hook run on every outgoing request, after those already installed.
    pub fn with_request_middleware(mut self, middleware: Arc<dyn RequestMiddleware>) -> Self {
        self.request_middleware.push(middleware);
        self
    }

    /// Append a hook notified of every outcome, after those already installed.
    pub fn with_response_middleware(mut self, middleware: Arc<dyn ResponseMiddleware>) -> Self {
        self.response_middleware.push(middleware);
        self
    }

    /// Install the standard chain for a session: request tracing, bearer
    /// credentials, and logout on 401.
    pub fn with_session(self, session: Arc<Session>) -> Self {
        self.with_request_middleware(Arc::new(BearerAuth::new(session.clone())))
            .with_response_middleware(Arc::new(TraceRequests))
            .with_response_middleware(Arc::new(LogoutOnUnauthorized::new(session)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send one request through the middleware chain.
    ///
    /// Response middleware see every outcome but cannot change it; the
    /// caller always receives the error as it happened.
    async fn dispatch<F>(&self, method: Method, path: &str, configure: F) -> Result<Response, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let mut request = configure(self.client.request(method.clone(), self.url(path))).build()?;

        for middleware in &self.request_middleware {
            middleware.before_request(&mut request)?;
        }

        let info = RequestInfo {
            method,
            path: path.to_string(),
        };

        let outcome = match self.client.execute(request).await {
            Ok(response) => Self::check_response(response).await,
            Err(e) => Err(ApiError::from(e)),
        };

        match &outcome {
            Ok(response) => {
                for middleware in &self.response_middleware {
                    middleware.on_response(&info, response.status());
                }
            }
            Err(error) => {
                for middleware in &self.response_middleware {
                    middleware.on_error(&info, error);
                }
            }
        }

        outcome
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.dispatch(Method::GET, path, |b| b).await?;
        Self::decode(path, response).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.dispatch(Method::GET, path, |b| b.query(query)).await?;
        Self::decode(path, response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(Method::POST, path, |b| b.json(body)).await?;
        Self::decode(path, response).await
    }

    /// POST whose response body is not needed.
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.dispatch(Method::POST, path, |b| b.json(body)).await?;
        Ok(())
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(Method::PUT, path, |b| b.json(body)).await?;
        Self::decode(path, response).await
    }

    /// Body-less PUT used for state transitions.
    pub(crate) async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(Method::PUT, path, |b| b).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(Method::DELETE, path, |b| b).await?;
        Ok(())
    }

    // ===== Authentication =====

    /// Exchange username and password for a token (OAuth2 password form).
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        let fields = credentials.form_fields();
        let response = self
            .dispatch(Method::POST, LOGIN_PATH, |b| b.form(&fields))
            .await?;
        Self::decode(LOGIN_PATH, response).await
    }

    /// Fetch the logged-in manager's profile.
    pub async fn current_profile(&self) -> Result<ManagerProfile, ApiError> {
        self.get(PROFILE_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/").expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/leads"), "http://localhost:8000/api/leads");
    }

    #[tokio::test]
    async fn test_get_with_query_sends_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats/daily"))
            .and(query_param("days", "14"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        let rows: Vec<serde_json::Value> = client
            .get_with_query("/stats/daily", &[("days", "14".to_string())])
            .await
            .expect("request succeeds");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/managers/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        let err = client.current_profile().await.expect_err("decode fails");
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/leads/9/close"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Lead not found"})))
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        match client.put_unit("/leads/9/close").await {
            Err(ApiError::NotFound(msg)) => assert_eq!(msg, "Lead not found"),
            other => panic!("unexpected outcome: {:?}", other.map(|_| ())),
        }
    }
}
