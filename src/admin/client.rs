use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::admin::endpoint::{AdminRoute, Endpoint, RouteMethod};
use crate::admin::traits::AdminApi;
use crate::error::{AppError, AppResult};

/// reqwest-backed admin API client. One connection pool for the process.
#[derive(Clone)]
pub struct HttpAdminClient {
    endpoint: Endpoint,
    client: Client,
}

impl HttpAdminClient {
    pub fn new(endpoint: Endpoint) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("claim-trigger/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn call(&self, route: AdminRoute, timeout: Duration) -> AppResult<String> {
        let url = self.endpoint.url(route);
        debug!(
            endpoint = %route,
            url = %url,
            timeout_secs = timeout.as_secs_f64(),
            "Calling admin API"
        );

        let request = match route.method() {
            RouteMethod::Get => self.client.get(&url),
            // The summary handler expects a JSON object even when empty
            RouteMethod::Post if route == AdminRoute::ContractsSummary => {
                self.client.post(&url).json(&serde_json::json!({}))
            }
            RouteMethod::Post => self.client.post(&url),
        };

        let response = request.timeout(timeout).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(AppError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpAdminClient {
        HttpAdminClient::new(Endpoint::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_version_probe_accepts_any_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/version"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.version(Duration::from_secs(5)).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_trigger_claims_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/provider-claims"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.trigger_claims(Duration::from_secs(60)).await.unwrap();
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_contracts_summary_posts_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/provider-contracts-summary"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"total":3}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.contracts_summary(Duration::from_secs(60)).await.unwrap();
        assert_eq!(body, r#"{"total":3}"#);
    }

    #[tokio::test]
    async fn test_non_2xx_is_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/provider-claims"))
            .respond_with(ResponseTemplate::new(500).set_body_string("claim tx failed"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.trigger_claims(Duration::from_secs(60)).await.unwrap_err();
        match err {
            AppError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "claim tx failed");
            }
            other => panic!("Expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/version"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.version(Duration::from_millis(100)).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        // Nothing listens on the discard port
        let client = HttpAdminClient::new(Endpoint::local(9)).unwrap();
        let err = client.version(Duration::from_secs(2)).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalError(_)), "got {:?}", err);
    }
}
