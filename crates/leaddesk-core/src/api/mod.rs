//! REST API client for the LeadDesk backend.
//!
//! Every call goes through `ApiClient`, which runs an ordered middleware
//! chain around a single dispatch function. The session-aware middleware
//! attach the bearer token and log the user out when the server answers 401.
//!
//! Domain wrappers are split by area: leads and messages, admin
//! (managers, projects, bots) and statistics.

pub mod admin;
pub mod client;
pub mod error;
pub mod leads;
pub mod middleware;
pub mod stats;

pub use client::{ApiClient, DEFAULT_BASE_URL, LOGIN_PATH, PROFILE_PATH};
pub use error::ApiError;
pub use middleware::{
    BearerAuth, LogoutOnUnauthorized, RequestInfo, RequestMiddleware, ResponseMiddleware,
    TraceRequests,
};
