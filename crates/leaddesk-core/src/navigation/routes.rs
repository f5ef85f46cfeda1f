//! Static route table.

use std::fmt;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Dashboard,
    Leads,
    LeadDetail,
    Projects,
    ProjectDetail,
    AdminManagers,
    NotFound,
}

impl RouteName {
    /// The descriptor registered for this name.
    pub fn descriptor(&self) -> &'static RouteDescriptor {
        ROUTES
            .iter()
            .find(|r| r.name == *self)
            .unwrap_or(&NOT_FOUND)
    }

    /// Concrete path for parameterless routes; parameterized routes fall back
    /// to their list page.
    pub fn path(&self) -> &'static str {
        match self {
            RouteName::Login => "/login",
            RouteName::Dashboard => "/",
            RouteName::Leads | RouteName::LeadDetail => "/leads",
            RouteName::Projects | RouteName::ProjectDetail => "/projects",
            RouteName::AdminManagers => "/admin/managers",
            RouteName::NotFound => "/404",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteName::Login => "login",
            RouteName::Dashboard => "dashboard",
            RouteName::Leads => "leads",
            RouteName::LeadDetail => "lead-detail",
            RouteName::Projects => "projects",
            RouteName::ProjectDetail => "project-detail",
            RouteName::AdminManagers => "admin-managers",
            RouteName::NotFound => "not-found",
        };
        f.write_str(name)
    }
}

/// A page the client can navigate to, with its access requirements.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: RouteName,
    /// Path pattern; `:id` segments match any single segment.
    pub pattern: &'static str,
    pub requires_auth: bool,
    pub roles: Option<&'static [Role]>,
}

impl RouteDescriptor {
    fn matches(&self, path: &str) -> Option<Option<String>> {
        let pattern: Vec<&str> = self.pattern.split('/').filter(|s| !s.is_empty()).collect();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut param = None;
        for (expected, actual) in pattern.iter().zip(&segments) {
            if expected.starts_with(':') {
                param = Some((*actual).to_string());
            } else if expected != actual {
                return None;
            }
        }
        Some(param)
    }

    /// Whether `role` satisfies this route's role restriction.
    pub fn allows_role(&self, role: Option<Role>) -> bool {
        match (self.roles, role) {
            (None, _) => true,
            (Some(roles), Some(role)) => roles.contains(&role),
            (Some(_), None) => false,
        }
    }
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];

static NOT_FOUND: RouteDescriptor = RouteDescriptor {
    name: RouteName::NotFound,
    pattern: "/*",
    requires_auth: false,
    roles: None,
};

pub static ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        name: RouteName::Login,
        pattern: "/login",
        requires_auth: false,
        roles: None,
    },
    RouteDescriptor {
        name: RouteName::Dashboard,
        pattern: "/",
        requires_auth: true,
        roles: None,
    },
    RouteDescriptor {
        name: RouteName::Leads,
        pattern: "/leads",
        requires_auth: true,
        roles: None,
    },
    RouteDescriptor {
        name: RouteName::LeadDetail,
        pattern: "/leads/:id",
        requires_auth: true,
        roles: None,
    },
    RouteDescriptor {
        name: RouteName::Projects,
        pattern: "/projects",
        requires_auth: true,
        roles: None,
    },
    RouteDescriptor {
        name: RouteName::ProjectDetail,
        pattern: "/projects/:id",
        requires_auth: true,
        roles: None,
    },
    RouteDescriptor {
        name: RouteName::AdminManagers,
        pattern: "/admin/managers",
        requires_auth: true,
        roles: Some(ADMIN_ONLY),
    },
];

/// A path resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDescriptor,
    pub path: String,
    pub id: Option<String>,
}

impl RouteMatch {
    pub fn name(&self) -> RouteName {
        self.route.name
    }
}

/// Resolve a path to its route. Unknown paths resolve to the not-found page.
pub fn resolve(path: &str) -> RouteMatch {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let normalized = if path.is_empty() { "/" } else { path };

    for route in ROUTES {
        if let Some(id) = route.matches(normalized) {
            return RouteMatch {
                route,
                path: normalized.to_string(),
                id,
            };
        }
    }

    RouteMatch {
        route: &NOT_FOUND,
        path: normalized.to_string(),
        id: None,
    }
}
