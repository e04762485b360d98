//! HTTP client for the planning service
//!
//! One outbound call per invocation, no internal retry, no caching, no
//! deduplication - mutual exclusion of concurrent submits is the UI's job.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::PlanError;
use super::types::{PlanRequest, PlanResult};
use crate::config::BackendConfig;

/// Error body shape the service uses for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Planning service client
pub struct PlanClient {
    http: Client,
    base_url: String,
}

impl PlanClient {
    /// Create a client from backend configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, PlanError> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "PlanClient::from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(PlanError::Network)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client posts to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a plan request
    ///
    /// Issues exactly one `POST <base>/plan-vacation`. Every failure comes
    /// back as a PlanError whose `user_message` is display-ready.
    pub async fn plan_vacation(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        let url = format!("{}/plan-vacation", self.base_url);
        debug!(%url, origin = %request.origin, "plan_vacation: called");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(PlanError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text).ok().and_then(|b| b.error);
            warn!(status = status.as_u16(), ?message, "plan_vacation: service returned error");
            return Err(PlanError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let result: PlanResult = response
            .json()
            .await
            .map_err(|e| PlanError::InvalidResponse(e.to_string()))?;
        debug!(destination = ?result.destination, days = result.days().len(), "plan_vacation: success");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::DEFAULT_FAILURE_MESSAGE;
    use crate::draft::Draft;

    fn test_request() -> PlanRequest {
        let mut draft = Draft::new();
        draft.origin = "Boston".to_string();
        draft.start_date = "2026-09-01".to_string();
        draft.end_date = "2026-09-05".to_string();
        draft.budget = "1200".to_string();
        PlanRequest::from_draft(&draft)
    }

    fn test_config(base_url: String) -> BackendConfig {
        BackendConfig {
            base_url,
            timeout_ms: 5_000,
        }
    }

    #[tokio::test]
    async fn test_success_decodes_plan_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/plan-vacation")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"destination":"Paris","itinerary":[],"booking_simulation":null}"#)
            .create_async()
            .await;

        let client = PlanClient::from_config(&test_config(server.url())).unwrap();
        let result = client.plan_vacation(&test_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.destination.as_deref(), Some("Paris"));
        assert!(result.days().is_empty());
        assert!(result.booking_simulation.is_none());
    }

    #[tokio::test]
    async fn test_error_body_message_extracted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/plan-vacation")
            .with_status(422)
            .with_body(r#"{"error":"Budget too low"}"#)
            .create_async()
            .await;

        let client = PlanClient::from_config(&test_config(server.url())).unwrap();
        let err = client.plan_vacation(&test_request()).await.unwrap_err();

        assert_eq!(err.status(), Some(422));
        assert_eq!(err.user_message(), "Budget too low");
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/plan-vacation")
            .with_status(500)
            .create_async()
            .await;

        let client = PlanClient::from_config(&test_config(server.url())).unwrap();
        let err = client.plan_vacation(&test_request()).await.unwrap_err();

        assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_non_json_error_body_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/plan-vacation")
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let client = PlanClient::from_config(&test_config(server.url())).unwrap();
        let err = client.plan_vacation(&test_request()).await.unwrap_err();

        assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_normalized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/plan-vacation")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = PlanClient::from_config(&test_config(server.url())).unwrap();
        let err = client.plan_vacation(&test_request()).await.unwrap_err();

        assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PlanClient::from_config(&test_config("http://localhost:8000/".to_string())).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
