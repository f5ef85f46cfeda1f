//! Lead triage and conversation endpoints.

use super::{ApiClient, ApiError};
use crate::models::{LeadResponse, LeadStatus, MessageResponse, SendMessageRequest};

impl ApiClient {
    /// List leads visible to the current user, newest first, optionally
    /// filtered by status.
    pub async fn leads(&self, status: Option<LeadStatus>) -> Result<Vec<LeadResponse>, ApiError> {
        match status {
            Some(status) => {
                self.get_with_query("/leads", &[("status", status.as_str().to_string())])
                    .await
            }
            None => self.get("/leads").await,
        }
    }

    pub async fn lead(&self, lead_id: i64) -> Result<LeadResponse, ApiError> {
        self.get(&format!("/leads/{}", lead_id)).await
    }

    pub async fn close_lead(&self, lead_id: i64) -> Result<(), ApiError> {
        self.put_unit(&format!("/leads/{}/close", lead_id)).await
    }

    pub async fn mark_lead_read(&self, lead_id: i64) -> Result<(), ApiError> {
        self.put_unit(&format!("/leads/{}/mark-read", lead_id)).await
    }

    /// Conversation history, oldest first.
    pub async fn messages(&self, lead_id: i64) -> Result<Vec<MessageResponse>, ApiError> {
        self.get(&format!("/messages/{}", lead_id)).await
    }

    pub async fn send_message(&self, lead_id: i64, text: &str) -> Result<(), ApiError> {
        let body = SendMessageRequest {
            text: text.to_string(),
        };
        self.post_unit(&format!("/messages/{}/send", lead_id), &body).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::ApiClient;
    use crate::models::{LeadState, LeadStatus};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lead(id: i64, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id, "telegram_chat_id": 1000 + id, "telegram_username": null,
            "telegram_first_name": "Ivan", "telegram_last_name": null, "bot_id": 1,
            "project_id": 1, "project_name": "Shop", "assigned_manager_id": 3,
            "status": status, "created_at": "2024-05-01T10:00:00",
            "last_updated_at": "2024-05-01T10:05:00"
        })
    }

    async fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&format!("{}/api", server.uri())).expect("client builds")
    }

    #[tokio::test]
    async fn test_leads_filtered_by_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .and(query_param("status", "in_progress"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([lead(1, "in_progress")])))
            .expect(1)
            .mount(&server)
            .await;

        let leads = client(&server)
            .await
            .leads(Some(LeadStatus::InProgress))
            .await
            .expect("request succeeds");
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].status, LeadState::InProgress);
    }

    #[tokio::test]
    async fn test_leads_without_filter_sends_no_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([lead(1, "new"), lead(2, "closed")])))
            .mount(&server)
            .await;

        let leads = client(&server).await.leads(None).await.expect("request succeeds");
        assert_eq!(leads.len(), 2);

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_state_transitions_use_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/leads/5/close"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "closed", "lead_id": 5})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/leads/5/mark-read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "read", "lead_id": 5})))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server).await;
        api.close_lead(5).await.expect("close succeeds");
        api.mark_lead_read(5).await.expect("mark read succeeds");
    }

    #[tokio::test]
    async fn test_send_message_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/messages/5/send"))
            .and(body_json(serde_json::json!({"text": "Hello!"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "sent"})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).await.send_message(5, "Hello!").await.expect("send succeeds");
    }
}
