//! Leads and their message history.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status values accepted by the lead list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Read,
    InProgress,
    Closed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Read => "read",
            LeadStatus::InProgress => "in_progress",
            LeadStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "new" => Ok(LeadStatus::New),
            "read" => Ok(LeadStatus::Read),
            "in_progress" => Ok(LeadStatus::InProgress),
            "closed" => Ok(LeadStatus::Closed),
            other => Err(format!(
                "unknown lead status '{}' (expected new, read, in_progress or closed)",
                other
            )),
        }
    }
}

/// Status carried by a lead record.
///
/// The filter enumeration has a `read` value that this one lacks. Both shapes
/// are kept as declared; any other value the server sends (such as `read`
/// after a lead is marked read) is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadState {
    New,
    InProgress,
    Closed,
    #[serde(untagged)]
    Other(String),
}

impl LeadState {
    pub fn display_name(&self) -> &str {
        match self {
            LeadState::New => "New",
            LeadState::InProgress => "In progress",
            LeadState::Closed => "Closed",
            LeadState::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadResponse {
    pub id: i64,
    pub telegram_chat_id: i64,
    pub telegram_username: Option<String>,
    pub telegram_first_name: Option<String>,
    pub telegram_last_name: Option<String>,
    pub bot_id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub assigned_manager_id: i64,
    pub status: LeadState,
    pub created_at: String,
    pub last_updated_at: String,
}

impl LeadResponse {
    /// Human-readable contact name: first/last name, then @username, then chat id.
    pub fn contact_name(&self) -> String {
        let parts: Vec<&str> = [&self.telegram_first_name, &self.telegram_last_name]
            .iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();

        if !parts.is_empty() {
            parts.join(" ")
        } else if let Some(username) = self.telegram_username.as_deref().filter(|u| !u.is_empty()) {
            format!("@{}", username)
        } else {
            format!("chat {}", self.telegram_chat_id)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Manager,
    Lead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: i64,
    pub sender: MessageSender,
    pub text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub text: String,
}
