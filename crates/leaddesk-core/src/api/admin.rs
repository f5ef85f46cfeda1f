//! Admin endpoints: managers, projects and bots.

use super::{ApiClient, ApiError};
use crate::models::{
    AddManagersRequest, BotCreate, BotResponse, BotUpdate, ManagerCreate, ManagerProfile,
    ManagerUpdate, ProjectCreate, ProjectResponse, ProjectWithManagers,
};

impl ApiClient {
    // ===== Managers =====

    pub async fn managers(&self) -> Result<Vec<ManagerProfile>, ApiError> {
        self.get("/admin/managers").await
    }

    pub async fn create_manager(&self, data: &ManagerCreate) -> Result<ManagerProfile, ApiError> {
        self.post("/admin/managers", data).await
    }

    pub async fn update_manager(
        &self,
        manager_id: i64,
        data: &ManagerUpdate,
    ) -> Result<ManagerProfile, ApiError> {
        self.put(&format!("/admin/managers/{}", manager_id), data).await
    }

    pub async fn delete_manager(&self, manager_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/managers/{}", manager_id)).await
    }

    // ===== Projects =====

    pub async fn projects(&self) -> Result<Vec<ProjectResponse>, ApiError> {
        self.get("/admin/projects").await
    }

    pub async fn create_project(&self, data: &ProjectCreate) -> Result<ProjectResponse, ApiError> {
        self.post("/admin/projects", data).await
    }

    /// Project with its assigned managers.
    pub async fn project(&self, project_id: i64) -> Result<ProjectWithManagers, ApiError> {
        self.get(&format!("/admin/projects/{}", project_id)).await
    }

    pub async fn update_project(
        &self,
        project_id: i64,
        data: &ProjectCreate,
    ) -> Result<ProjectResponse, ApiError> {
        self.put(&format!("/admin/projects/{}", project_id), data).await
    }

    pub async fn delete_project(&self, project_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/projects/{}", project_id)).await
    }

    pub async fn add_project_managers(
        &self,
        project_id: i64,
        manager_ids: &[i64],
    ) -> Result<(), ApiError> {
        let body = AddManagersRequest {
            manager_ids: manager_ids.to_vec(),
        };
        self.post_unit(&format!("/admin/projects/{}/managers", project_id), &body)
            .await
    }

    pub async fn remove_project_manager(&self, project_id: i64, manager_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/projects/{}/managers/{}", project_id, manager_id))
            .await
    }

    // ===== Bots =====

    pub async fn project_bots(&self, project_id: i64) -> Result<Vec<BotResponse>, ApiError> {
        self.get(&format!("/admin/projects/{}/bots", project_id)).await
    }

    pub async fn create_bot(&self, project_id: i64, data: &BotCreate) -> Result<BotResponse, ApiError> {
        self.post(&format!("/admin/projects/{}/bots", project_id), data).await
    }

    pub async fn update_bot(
        &self,
        project_id: i64,
        bot_id: i64,
        data: &BotUpdate,
    ) -> Result<BotResponse, ApiError> {
        self.put(&format!("/admin/projects/{}/bots/{}", project_id, bot_id), data)
            .await
    }

    pub async fn delete_bot(&self, project_id: i64, bot_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/projects/{}/bots/{}", project_id, bot_id))
            .await
    }
}
