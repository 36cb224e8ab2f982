//! GA4 Data API Client
//!
//! HTTP client for the Google Analytics Data API `runReport` method.

use async_trait::async_trait;
use gcp_auth::TokenProvider;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::types::{ErrorEnvelope, RunReportRequest, RunReportResponse};
use crate::report::{ReportResponse, ReportSpec};

/// OAuth scope needed for report queries
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Executes report specs against a reporting service.
///
/// Implementations must be shareable across concurrent requests.
#[async_trait]
pub trait ReportingClient: Send + Sync {
    async fn run_report(&self, spec: &ReportSpec) -> Result<ReportResponse, ReportingError>;
}

/// Configuration for [`GaDataClient`]
#[derive(Debug, Clone)]
pub struct GaClientConfig {
    /// API root (e.g., "https://analyticsdata.googleapis.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for GaClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://analyticsdata.googleapis.com".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// GA4 Data API client
pub struct GaDataClient {
    client: Client,
    config: GaClientConfig,
    auth: Option<Arc<dyn TokenProvider>>,
}

impl GaDataClient {
    /// Create a client. Without a token provider requests are sent unauthenticated.
    pub fn new(
        config: GaClientConfig,
        auth: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self, ReportingError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("ga-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            auth,
        })
    }

    /// Create a client authenticated with a service-account key file, or with
    /// application default credentials when no file is given.
    pub async fn with_credentials(
        config: GaClientConfig,
        credentials: Option<&Path>,
    ) -> Result<Self, ReportingError> {
        let provider: Arc<dyn TokenProvider> = match credentials {
            Some(path) => {
                tracing::info!("Using service account credentials from {:?}", path);
                Arc::new(gcp_auth::CustomServiceAccount::from_file(path)?)
            }
            None => {
                tracing::info!("No credentials file configured, using application default credentials");
                gcp_auth::provider().await?
            }
        };

        Self::new(config, Some(provider))
    }

    fn report_url(&self, property_id: &str) -> String {
        format!(
            "{}/v1beta/properties/{}:runReport",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(property_id)
        )
    }

    fn map_send_error(e: reqwest::Error) -> ReportingError {
        if e.is_timeout() {
            ReportingError::Timeout
        } else if e.is_connect() {
            ReportingError::Unavailable
        } else {
            ReportingError::Request(e)
        }
    }
}

#[async_trait]
impl ReportingClient for GaDataClient {
    async fn run_report(&self, spec: &ReportSpec) -> Result<ReportResponse, ReportingError> {
        let url = self.report_url(spec.property_id());
        let body = RunReportRequest::from(spec);

        let mut request = self.client.post(&url).json(&body);
        if let Some(auth) = &self.auth {
            let token = auth.token(&[ANALYTICS_READONLY_SCOPE]).await?;
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            return Err(ReportingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await.map_err(Self::map_send_error)?;
        let decoded: RunReportResponse =
            serde_json::from_str(&text).map_err(|e| ReportingError::Decode(e.to_string()))?;
        let report = ReportResponse::from(decoded);

        tracing::debug!(
            property_id = %spec.property_id(),
            dimensions = ?spec.dimensions(),
            metrics = ?spec.metrics(),
            rows = ?report.rows.as_ref().map(Vec::len),
            row_count = ?report.row_count,
            "Report completed"
        );

        Ok(report)
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when querying the reporting service
#[derive(Error, Debug)]
pub enum ReportingError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] gcp_auth::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Reporting API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DateRange, DimensionFilter, ReportRow};
    use serde_json::json;
    use gcp_auth::Token;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GaDataClient {
        let config = GaClientConfig {
            base_url: server.uri(),
            request_timeout_ms: 5_000,
        };
        GaDataClient::new(config, None).unwrap()
    }

    /// Token provider handing out a fixed token, or failing when `token` is None
    struct StaticToken {
        token: Option<&'static str>,
    }

    #[async_trait]
    impl TokenProvider for StaticToken {
        async fn token(&self, scopes: &[&str]) -> Result<Arc<Token>, gcp_auth::Error> {
            assert_eq!(scopes, [ANALYTICS_READONLY_SCOPE]);
            let access_token = self.token.ok_or(gcp_auth::Error::Str("no credentials"))?;
            let token: Token = serde_json::from_value(json!({
                "access_token": access_token,
                "expires_in": 3600,
            }))
            .unwrap();
            Ok(Arc::new(token))
        }

        async fn project_id(&self) -> Result<Arc<str>, gcp_auth::Error> {
            Ok(Arc::from("test-project"))
        }
    }

    fn authenticated_client_for(server: &MockServer, token: Option<&'static str>) -> GaDataClient {
        let config = GaClientConfig {
            base_url: server.uri(),
            request_timeout_ms: 5_000,
        };
        GaDataClient::new(config, Some(Arc::new(StaticToken { token }))).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = GaClientConfig::default();
        assert_eq!(config.base_url, "https://analyticsdata.googleapis.com");
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_report_url() {
        let config = GaClientConfig {
            base_url: "http://localhost:9999/".to_string(),
            request_timeout_ms: 1_000,
        };
        let client = GaDataClient::new(config, None).unwrap();
        assert_eq!(
            client.report_url("501552511"),
            "http://localhost:9999/v1beta/properties/501552511:runReport"
        );
    }

    #[tokio::test]
    async fn test_run_report_sends_spec_and_decodes_rows() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/properties/501552511:runReport"))
            .and(body_json(json!({
                "dateRanges": [{"startDate": "2024-08-01", "endDate": "today"}],
                "dimensions": [{"name": "city"}],
                "metrics": [{"name": "activeUsers"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rows": [
                    {"dimensionValues": [{"value": "Paris"}], "metricValues": [{"value": "120"}]},
                    {"dimensionValues": [{"value": "Tokyo"}], "metricValues": [{"value": "300"}]}
                ],
                "rowCount": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let spec = ReportSpec::new("501552511", "activeUsers")
            .dimension("city")
            .date_range(DateRange::default());
        let response = client_for(&server).run_report(&spec).await.unwrap();

        assert_eq!(
            response.rows,
            Some(vec![
                ReportRow::new(["Paris"], ["120"]),
                ReportRow::new(["Tokyo"], ["300"]),
            ])
        );
        assert_eq!(response.row_count, Some(2));
    }

    #[tokio::test]
    async fn test_run_report_sends_filter() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/properties/7:runReport"))
            .and(body_json(json!({
                "dimensions": [{"name": "pagePath"}, {"name": "eventName"}],
                "metrics": [{"name": "eventCount"}],
                "dimensionFilter": {"filter": {
                    "fieldName": "eventName",
                    "stringFilter": {"matchType": "EXACT", "value": "click"}
                }}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let spec = ReportSpec::new("7", "eventCount")
            .dimension("pagePath")
            .dimension("eventName")
            .filter(DimensionFilter::exact("eventName", "click"));
        let response = client_for(&server).run_report(&spec).await.unwrap();

        assert_eq!(response.rows, None);
    }

    #[tokio::test]
    async fn test_api_error_uses_google_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "User does not have sufficient permissions for this property.",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .run_report(&ReportSpec::new("1", "sessions"))
            .await
            .unwrap_err();

        match err {
            ReportingError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(
                    message,
                    "User does not have sufficient permissions for this property."
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_error_with_plain_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>502</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .run_report(&ReportSpec::new("1", "sessions"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API error 502: <html>502</html>");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .run_report(&ReportSpec::new("1", "sessions"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportingError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let config = GaClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_ms: 1_000,
        };
        let client = GaDataClient::new(config, None).unwrap();

        let err = client
            .run_report(&ReportSpec::new("1", "sessions"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReportingError::Unavailable | ReportingError::Timeout | ReportingError::Request(_)
        ));
    }

    #[tokio::test]
    async fn test_run_report_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/properties/501552511:runReport"))
            .and(header("authorization", "Bearer ya29.test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rows": [{"metricValues": [{"value": "0.42"}]}],
                "rowCount": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = authenticated_client_for(&server, Some("ya29.test-token"))
            .run_report(&ReportSpec::new("501552511", "bounceRate"))
            .await
            .unwrap();

        assert_eq!(response.row_count, Some(1));
        assert_eq!(response.rows.unwrap()[0].metric(0), Some("0.42"));
    }

    #[tokio::test]
    async fn test_token_failure_is_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let err = authenticated_client_for(&server, None)
            .run_report(&ReportSpec::new("501552511", "bounceRate"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportingError::Auth(_)));
        assert!(err.to_string().contains("no credentials"));
    }
}
