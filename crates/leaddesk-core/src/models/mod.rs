//! Data models for LeadDesk entities.
//!
//! These are the request and response records exchanged with the backend:
//!
//! - `ManagerProfile`, `Role`: staff accounts and the logged-in profile
//! - `LeadResponse`, `MessageResponse`: leads and their conversations
//! - `ProjectResponse`, `BotResponse`: project and bot administration
//! - Stats types: `OverviewStats`, `ManagerStats`, `DailyStats`, etc.

pub mod lead;
pub mod manager;
pub mod project;
pub mod stats;

pub use lead::{LeadResponse, LeadState, LeadStatus, MessageResponse, MessageSender, SendMessageRequest};
pub use manager::{
    LoginCredentials, LoginResponse, ManagerCreate, ManagerInfo, ManagerProfile, ManagerUpdate,
    ProjectInfo, Role,
};
pub use project::{
    AddManagersRequest, BotCreate, BotResponse, BotUpdate, ProjectCreate, ProjectResponse,
    ProjectWithManagers,
};
pub use stats::{
    DailyManagerStats, DailyManagerStatsParams, DailyStats, Last24HoursStats, ManagerStats,
    ManagerStats24h, OverviewStats, DEFAULT_DAILY_STATS_DAYS,
};
