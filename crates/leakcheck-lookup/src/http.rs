//! Lookup backend that calls a remote lookup service.
//!
//! Speaks the `GET /check-leak?type=<kind>&value=<value>` protocol served by
//! `leakcheck-server`.

use crate::backend::LookupBackend;
use crate::error::{LookupError, Result};
use async_trait::async_trait;
use leakcheck_core::{BackendConfig, LeakResult, QueryKind};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const BACKEND_ID: &str = "http";

/// Error body returned by the lookup service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for a remote lookup service.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBackend {
    /// Create a backend pointed at `base_url` with the given request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::build(base_url.into(), timeout, None)
    }

    /// Create a backend from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::build(
            config.url.clone(),
            config.timeout(),
            Some(config.user_agent.as_str()),
        )
    }

    fn build(base_url: String, timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(|e| LookupError::BackendUnavailable {
            backend: BACKEND_ID.to_string(),
            message: format!("failed to create HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn map_send_error(&self, e: &reqwest::Error) -> LookupError {
        if e.is_timeout() {
            LookupError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            LookupError::BackendUnavailable {
                backend: BACKEND_ID.to_string(),
                message: e.to_string(),
            }
        }
    }
}

fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[async_trait]
impl LookupBackend for HttpBackend {
    async fn lookup(&self, value: &str, kind: QueryKind) -> Result<LeakResult> {
        let response = self
            .client
            .get(format!("{}/check-leak", self.base_url))
            .query(&[("type", kind.as_str()), ("value", value)])
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = retry_after_secs(&response);
            tracing::warn!("Lookup service rate limited us (retry after {:?}s)", retry_after_secs);
            return Err(LookupError::RateLimited {
                backend: BACKEND_ID.to_string(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map_or(error_text, |body| body.error);

            tracing::warn!("Lookup service returned {}: {}", status, message);
            return Err(if status.is_client_error() {
                LookupError::Rejected {
                    backend: BACKEND_ID.to_string(),
                    message,
                }
            } else {
                LookupError::BackendUnavailable {
                    backend: BACKEND_ID.to_string(),
                    message: format!("status {}: {message}", status.as_u16()),
                }
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(&e))?;
        serde_json::from_str::<LeakResult>(&body).map_err(|e| LookupError::InvalidResponse {
            backend: BACKEND_ID.to_string(),
            message: format!("failed to parse response: {e}"),
        })
    }

    fn backend_id(&self) -> &str {
        BACKEND_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leakcheck_core::Severity;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn backend_for(server: &MockServer) -> HttpBackend {
        HttpBackend::new(server.uri(), Duration::from_secs(5)).expect("create backend")
    }

    #[tokio::test]
    async fn test_lookup_parses_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-leak"))
            .and(query_param("type", "phone"))
            .and(query_param("value", "+15550100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "danger",
                "count": 3,
                "breaches": ["LinkedIn 2021", "Facebook 2019", "Adobe 2013"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = backend_for(&server)
            .await
            .lookup("+15550100", QueryKind::Phone)
            .await
            .expect("lookup");

        assert_eq!(result.severity(), Severity::Danger);
        assert_eq!(result.match_count(), 3);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-leak"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .await
            .lookup("a@b.com", QueryKind::Email)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            LookupError::RateLimited {
                backend: "http".to_string(),
                retry_after_secs: Some(30),
            }
        );
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-leak"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"error": "Value parameter is required"}),
            ))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .await
            .lookup("x", QueryKind::Login)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            LookupError::Rejected {
                backend: "http".to_string(),
                message: "Value parameter is required".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_maps_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .await
            .lookup("a@b.com", QueryKind::Email)
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::BackendUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_inconsistent_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"type": "safe", "count": 2, "breaches": []}),
            ))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .await
            .lookup("a@b.com", QueryKind::Email)
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_slow_service_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"type": "safe", "count": 0, "breaches": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let backend =
            HttpBackend::new(server.uri(), Duration::from_millis(100)).expect("create backend");
        let err = backend
            .lookup("a@b.com", QueryKind::Email)
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        // Port 9 (discard) is not expected to be listening.
        let backend =
            HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("create backend");
        let err = backend
            .lookup("a@b.com", QueryKind::Email)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LookupError::BackendUnavailable { .. } | LookupError::Timeout { .. }
        ));
    }
}
