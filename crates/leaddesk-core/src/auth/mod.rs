//! Authentication state and its durable storage.
//!
//! This module provides:
//! - `Session`: the logged-in token and profile, shared by the HTTP client
//!   and the router
//! - `SessionStore`: key-value persistence, with file, keychain and
//!   in-memory backends
//!
//! The token is kept under the `token` key and the profile as JSON under
//! `user`.

pub mod credentials;
pub mod session;
pub mod storage;

pub use credentials::KeyringStore;
pub use session::{Session, SessionData, DISPLAY_NAME_FALLBACK, POST_LOGIN_ROUTE};
pub use storage::{FileStore, MemoryStore, SessionStore, TOKEN_KEY, USER_KEY};
