//! Page navigation: the static route table, the guard that gates every
//! transition, and the history that records navigation requests.
//!
//! The session and the HTTP client never drive the router directly. They
//! talk to a `Navigator`, which only records what was requested; the router
//! applies those requests (through the guard) when the caller drains them.

pub mod guard;
pub mod history;
pub mod routes;

pub use guard::{evaluate, Decision};
pub use history::{History, NavigationRequest, Navigator, Router, Transition};
pub use routes::{resolve, RouteDescriptor, RouteMatch, RouteName, ROUTES};
