use forta_types::{Block, EventType, Network};
use serde::{Deserialize, Serialize};

/// A new (or reorged) block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEvent {
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    pub network: Network,
    pub block: Block,
}

impl BlockEvent {
    pub fn block_hash(&self) -> &str {
        &self.block.hash
    }

    pub fn block_number(&self) -> u64 {
        self.block.number
    }
}
