//! Manager accounts, roles and the login exchange.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Grant type sent with every password login.
pub const PASSWORD_GRANT_TYPE: &str = "password";

/// Staff role. Admins can manage managers, projects and bots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A project reference attached to a manager profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: i64,
    pub name: String,
}

/// The profile of a manager, as returned by login, `/managers/me` and the
/// admin manager endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerProfile {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub full_name: String,
    pub is_active: bool,
    /// Not included in the login response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectInfo>,
}

impl ManagerProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Comma-separated project names, or "-" when unassigned.
    pub fn project_names(&self) -> String {
        if self.projects.is_empty() {
            "-".to_string()
        } else {
            self.projects
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// Username and password entered at login.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Form fields for the OAuth2 password flow.
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("grant_type", PASSWORD_GRANT_TYPE),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: ManagerProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManagerCreate {
    pub username: String,
    pub password: String,
    pub full_name: String,
}

/// Partial update; `None` fields are left out of the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ManagerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ManagerUpdate {
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.full_name.is_none() && self.is_active.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerInfo {
    pub id: i64,
    pub username: String,
    pub full_name: String,
}
