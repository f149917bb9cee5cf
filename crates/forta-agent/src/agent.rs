//! Agent handler trait.

use async_trait::async_trait;
use forta_types::Finding;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::events::{AlertEvent, BlockEvent, TransactionEvent};

/// A bot alert subscription requested at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSubscription {
    pub bot_id: String,
    pub alert_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConfig {
    pub subscriptions: Vec<BotSubscription>,
}

/// Returned from [`Agent::initialize`] to subscribe to other bots' alerts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResponse {
    pub alert_config: AlertConfig,
}

/// A detection bot. Every handler defaults to producing no findings.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn initialize(&self) -> Result<Option<InitializeResponse>, AgentError> {
        Ok(None)
    }

    async fn handle_transaction(
        &self,
        _event: &TransactionEvent,
    ) -> Result<Vec<Finding>, AgentError> {
        Ok(Vec::new())
    }

    async fn handle_block(&self, _event: &BlockEvent) -> Result<Vec<Finding>, AgentError> {
        Ok(Vec::new())
    }

    async fn handle_alert(&self, _event: &AlertEvent) -> Result<Vec<Finding>, AgentError> {
        Ok(Vec::new())
    }
}
