//! Projects and the bots attached to them.

use serde::{Deserialize, Serialize};

use super::ManagerInfo;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreate {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithManagers {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub managers: Vec<ManagerInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddManagersRequest {
    pub manager_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotCreate {
    pub identifier: String,
    pub name: String,
    pub token: String,
    pub auto_reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotResponse {
    pub id: i64,
    pub identifier: String,
    pub name: String,
    pub project_id: i64,
    pub token: String,
    pub auto_reply: String,
    pub webhook_url: Option<String>,
    pub is_active: bool,
}

impl BotResponse {
    /// Bot token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let visible: String = self
            .token
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if self.token.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("****{}", visible)
        }
    }
}

/// Partial update; `None` fields are left out of the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
