use serde::{Deserialize, Serialize};

use crate::alert::Alert;

/// An alert from a subscribed bot, for combiner bots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertEvent {
    pub alert: Alert,
}

impl AlertEvent {
    pub fn alert_id(&self) -> Option<&str> {
        self.alert.alert_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.alert.name.as_deref()
    }

    /// Same as [`AlertEvent::alert_hash`].
    pub fn hash(&self) -> Option<&str> {
        self.alert_hash()
    }

    pub fn alert_hash(&self) -> Option<&str> {
        self.alert.hash.as_deref()
    }

    pub fn bot_id(&self) -> Option<&str> {
        self.alert.source.as_ref()?.bot.as_ref()?.id.as_deref()
    }

    pub fn transaction_hash(&self) -> Option<&str> {
        self.alert.source.as_ref()?.transaction_hash.as_deref()
    }

    pub fn block_hash(&self) -> Option<&str> {
        self.alert.source.as_ref()?.block.as_ref()?.hash.as_deref()
    }

    pub fn block_number(&self) -> Option<u64> {
        self.alert.source.as_ref()?.block.as_ref()?.number
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.alert.source.as_ref()?.block.as_ref()?.chain_id
    }
}
