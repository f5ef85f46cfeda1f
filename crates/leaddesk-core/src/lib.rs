//! LeadDesk core library.
//!
//! Everything the client needs below the presentation layer:
//!
//! - `auth`: the shared `Session` and its durable storage
//! - `api`: the HTTP client, its middleware chain and the domain wrappers
//! - `navigation`: route table, access guard and router
//! - `models`: request/response records
//! - `config`: on-disk configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod navigation;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{Session, SessionData, SessionStore};
pub use config::{Config, StorageBackend};
pub use navigation::{History, Navigator, RouteName, Router};
