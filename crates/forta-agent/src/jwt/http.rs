//! HTTP adapters for the JWT ports.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{ContractCaller, JwtProvider};
use crate::error::JwtError;
use crate::rpc::JsonRpcClient;

/// JWT provider endpoint inside a scan node.
pub const JWT_PROVIDER_URL: &str = "http://forta-jwt-provider:8515/create";

#[derive(Debug, Deserialize)]
struct CreateTokenResponse {
    token: String,
}

/// Posts `{claims}` to the scan node's JWT provider.
pub struct HttpJwtProvider {
    http_client: reqwest::Client,
    url: String,
}

impl HttpJwtProvider {
    pub fn new() -> Self {
        Self::with_url(JWT_PROVIDER_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for HttpJwtProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JwtProvider for HttpJwtProvider {
    async fn create(&self, claims: Value) -> Result<String, JwtError> {
        let response: CreateTokenResponse = self
            .http_client
            .post(&self.url)
            .json(&serde_json::json!({ "claims": claims }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.token)
    }
}

/// `eth_call` against the latest block.
pub struct JsonRpcContractCaller {
    client: JsonRpcClient,
}

impl JsonRpcContractCaller {
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, JwtError> {
        Ok(Self {
            client: JsonRpcClient::new(rpc_url)?,
        })
    }
}

#[async_trait]
impl ContractCaller for JsonRpcContractCaller {
    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, JwtError> {
        let params = (
            serde_json::json!({ "to": to, "data": format!("0x{}", hex::encode(data)) }),
            "latest",
        );
        let result: String = self.client.call("eth_call", params).await?;
        decode_hex_result(&result)
    }
}

fn decode_hex_result(result: &str) -> Result<Vec<u8>, JwtError> {
    let digits = result.strip_prefix("0x").unwrap_or(result);
    hex::decode(digits).map_err(|e| JwtError::Response(format!("eth_call result: {e}")))
}
