//! Statistics endpoints.

use super::{ApiClient, ApiError};
use crate::models::{
    DailyManagerStats, DailyManagerStatsParams, DailyStats, Last24HoursStats, ManagerStats,
    ManagerStats24h, OverviewStats,
};

impl ApiClient {
    pub async fn overview_stats(&self) -> Result<OverviewStats, ApiError> {
        self.get("/stats/overview").await
    }

    pub async fn all_manager_stats(&self) -> Result<Vec<ManagerStats>, ApiError> {
        self.get("/stats/managers").await
    }

    pub async fn manager_stats(&self, manager_id: i64) -> Result<ManagerStats, ApiError> {
        self.get(&format!("/stats/manager/{}", manager_id)).await
    }

    /// Totals for the last 24 hours (admin only on the server).
    pub async fn last_24h_stats(&self) -> Result<Last24HoursStats, ApiError> {
        self.get("/stats/last24hours").await
    }

    pub async fn last_24h_manager_stats(&self) -> Result<Vec<ManagerStats24h>, ApiError> {
        self.get("/stats/last24hours/managers").await
    }

    pub async fn daily_stats(&self, days: u32) -> Result<Vec<DailyStats>, ApiError> {
        self.get_with_query("/stats/daily", &[("days", days.to_string())])
            .await
    }

    pub async fn daily_manager_stats(
        &self,
        params: &DailyManagerStatsParams,
    ) -> Result<Vec<DailyManagerStats>, ApiError> {
        self.get_with_query("/stats/daily/managers", &params.query_pairs())
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::ApiClient;
    use crate::models::DailyManagerStatsParams;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_daily_manager_stats_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats/daily/managers"))
            .and(query_param("days", "30"))
            .and(query_param("manager_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "date": "2024-05-02", "manager_id": 3, "manager_name": "Anna K",
                "new_leads": 2, "closed_leads": 1, "messages_count": 11
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        let params = DailyManagerStatsParams {
            days: Some(30),
            manager_id: Some(3),
            ..Default::default()
        };
        let rows = api.daily_manager_stats(&params).await.expect("request succeeds");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].messages_count, 11);
    }

    #[tokio::test]
    async fn test_last_24h_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats/last24hours"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "new_leads": 5, "closed_leads": 2, "messages_count": 40, "active_conversations": 3
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&format!("{}/api", server.uri())).expect("client builds");
        let stats = api.last_24h_stats().await.expect("request succeeds");
        assert_eq!(stats.active_conversations, 3);
    }
}
