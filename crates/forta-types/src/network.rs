//! Chain networks and block event kinds.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Network a block or transaction was observed on, keyed by chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum Network {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    /// Any chain id without a named variant.
    Other(u64),
}

impl Network {
    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Ropsten => 3,
            Network::Rinkeby => 4,
            Network::Goerli => 5,
            Network::Other(id) => id,
        }
    }
}

impl From<u64> for Network {
    fn from(chain_id: u64) -> Self {
        match chain_id {
            1 => Network::Mainnet,
            3 => Network::Ropsten,
            4 => Network::Rinkeby,
            5 => Network::Goerli,
            other => Network::Other(other),
        }
    }
}

impl From<Network> for u64 {
    fn from(network: Network) -> Self {
        network.chain_id()
    }
}

/// Whether a block arrived in canonical order or as part of a reorg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EventType {
    #[default]
    Block,
    Reorg,
}

impl TryFrom<u8> for EventType {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventType::Block),
            1 => Ok(EventType::Reorg),
            other => Err(ValidationError::OutOfRange {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

impl From<EventType> for u8 {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Block => 0,
            EventType::Reorg => 1,
        }
    }
}
