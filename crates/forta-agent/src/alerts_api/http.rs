//! `reqwest` transport for the GraphQL API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use super::GraphqlTransport;
use crate::error::ApiError;

/// POSTs JSON bodies to the GraphQL endpoint.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// `api_key` is sent as `Authorization: Bearer <key>` when set.
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(default_headers(api_key.as_deref())?)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn default_headers(api_key: Option<&str>) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        let value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| ApiError::Parse(format!("invalid API key: {e}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
    async fn post(&self, body: &Value) -> Result<Value, ApiError> {
        let response = self.client.post(&self.url).json(body).send().await?;
        let response = response.error_for_status()?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_with_key() {
        let headers = default_headers(Some("secret")).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
    }

    #[test]
    fn test_headers_without_key() {
        let headers = default_headers(None).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(default_headers(Some("bad\nkey")).is_err());
    }
}
