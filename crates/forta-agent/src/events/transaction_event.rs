use std::collections::BTreeMap;

use forta_types::numeric::int_or_hex;
use forta_types::{keccak256_hex, EventType, Log, Network, Transaction};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::abi::{EventAbi, LogDescription};
use crate::error::AbiError;

/// Block context of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TxEventBlock {
    pub hash: String,
    #[serde(with = "int_or_hex")]
    pub number: u64,
    #[serde(with = "int_or_hex")]
    pub timestamp: u64,
}

/// A transaction together with the logs it emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    pub network: Network,
    pub transaction: Transaction,
    #[serde(default)]
    pub logs: Vec<Log>,
    /// Every address the transaction touched.
    #[serde(default)]
    pub addresses: BTreeMap<String, bool>,
    pub block: TxEventBlock,
}

impl TransactionEvent {
    pub fn hash(&self) -> &str {
        &self.transaction.hash
    }

    pub fn from(&self) -> &str {
        &self.transaction.from
    }

    pub fn to(&self) -> Option<&str> {
        self.transaction.to.as_deref()
    }

    pub fn gas_price(&self) -> &str {
        &self.transaction.gas_price
    }

    pub fn timestamp(&self) -> u64 {
        self.block.timestamp
    }

    pub fn block_number(&self) -> u64 {
        self.block.number
    }

    pub fn block_hash(&self) -> &str {
        &self.block.hash
    }

    /// Logs whose first topic is `keccak256(event_signature)`, optionally
    /// restricted to one emitting contract. Both comparisons ignore case.
    pub fn filter_event(&self, event_signature: &str, contract_address: Option<&str>) -> Vec<&Log> {
        let topic = keccak256_hex(event_signature);
        self.logs
            .iter()
            .filter(|log| log.topic0().is_some_and(|t| t.eq_ignore_ascii_case(&topic)))
            .filter(|log| {
                contract_address
                    .filter(|c| !c.is_empty())
                    .map_or(true, |c| log.address.eq_ignore_ascii_case(c))
            })
            .collect()
    }

    pub fn has_event(&self, event_signature: &str, contract_address: Option<&str>) -> bool {
        !self.filter_event(event_signature, contract_address).is_empty()
    }

    /// Decode logs matching `event_abi` emitted by any of `contracts`
    /// (all contracts when empty). Logs that fail to decode are skipped.
    pub fn filter_log(
        &self,
        event_abi: &str,
        contracts: &[&str],
    ) -> Result<Vec<LogDescription>, AbiError> {
        let abi = EventAbi::parse(event_abi)?;
        let decoded: Vec<LogDescription> = self
            .logs
            .iter()
            .filter(|log| {
                contracts.is_empty() || contracts.iter().any(|c| log.address.eq_ignore_ascii_case(c))
            })
            .filter_map(|log| abi.decode_log(log))
            .collect();
        trace!(event = %abi.name, tx = %self.transaction.hash, matched = decoded.len(), "filtered logs");
        Ok(decoded)
    }
}
