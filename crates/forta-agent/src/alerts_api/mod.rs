//! Forta GraphQL API client
//!
//! `AlertsClient` builds the `fetchAlerts` query and the `SendAlerts`
//! mutation and hands the bodies to a [`GraphqlTransport`]. The HTTP
//! transport adds the API key header; tests substitute a mock.

mod http;
mod mutation;
mod query;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{FortaConfig, RuntimeEnv};
use crate::error::ApiError;

pub use http::HttpTransport;
pub use mutation::{alert_request_finding, SendAlertError, SendAlertsInput, SendAlertsResponse};
pub use query::{
    AlertCursor, AlertQueryOptions, AlertsResponse, BlockDateRange, BlockNumberRange, PageInfo,
    ScanNodeConfirmations, SortDirection,
};

/// Sends a GraphQL request body and returns the decoded response body.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn post(&self, body: &Value) -> Result<Value, ApiError>;
}

/// Alerts API bound to a transport.
pub struct AlertsClient<T: GraphqlTransport> {
    transport: T,
    private_findings: bool,
}

impl AlertsClient<HttpTransport> {
    /// HTTP client for the configured endpoint and key.
    pub fn from_config(env: &RuntimeEnv, config: &FortaConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(env.forta_api_url(config), env.forta_api_key(config))?;
        Ok(Self::new(transport, config.private_findings.unwrap_or(false)))
    }
}

impl<T: GraphqlTransport> AlertsClient<T> {
    pub fn new(transport: T, private_findings: bool) -> Self {
        Self {
            transport,
            private_findings,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One page of alerts matching `options`.
    #[instrument(skip_all, fields(first = ?options.first))]
    pub async fn get_alerts(&self, options: &AlertQueryOptions) -> Result<AlertsResponse, ApiError> {
        let response = self.transport.post(&options.to_request()).await?;
        let page: AlertsResponse = extract(response, &["alerts"])?;
        debug!(
            alerts = page.alerts.len(),
            has_next_page = page.page_info.has_next_page,
            "fetched alerts"
        );
        Ok(page)
    }

    /// Publish findings; one response per input, in order.
    #[instrument(skip_all, fields(count = inputs.len()))]
    pub async fn send_alerts(
        &self,
        inputs: &[SendAlertsInput],
    ) -> Result<Vec<SendAlertsResponse>, ApiError> {
        let body = mutation::to_request(inputs, self.private_findings);
        let response = self.transport.post(&body).await?;
        extract(response, &["sendAlerts", "alerts"])
    }
}

/// Fail on `errors`, then decode `data.<path>`.
fn extract<R: DeserializeOwned>(mut response: Value, path: &[&str]) -> Result<R, ApiError> {
    if let Some(errors) = response.get("errors").filter(|e| !e.is_null()) {
        return Err(ApiError::Graphql(errors.to_string()));
    }

    let mut node = response
        .get_mut("data")
        .map(Value::take)
        .ok_or_else(|| ApiError::Parse("response has no data".into()))?;
    for key in path {
        node = node
            .get_mut(*key)
            .map(Value::take)
            .ok_or_else(|| ApiError::Parse(format!("response has no {key}")))?;
    }
    serde_json::from_value(node).map_err(|e| ApiError::Parse(e.to_string()))
}
