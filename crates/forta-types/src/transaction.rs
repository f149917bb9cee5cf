//! Transactions and the logs they emitted.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::numeric::{int_or_hex, opt_int_or_hex};

/// A transaction as observed by the scan node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    /// `None` for contract creation.
    pub to: Option<String>,
    #[serde(with = "int_or_hex")]
    pub nonce: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub gas: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: String,
    #[serde(deserialize_with = "null_as_default")]
    pub r: String,
    #[serde(deserialize_with = "null_as_default")]
    pub s: String,
    #[serde(deserialize_with = "null_as_default")]
    pub v: String,
}

/// An event log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Log {
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: String,
    #[serde(with = "opt_int_or_hex")]
    pub log_index: Option<u64>,
    #[serde(with = "opt_int_or_hex")]
    pub block_number: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub block_hash: String,
    #[serde(with = "opt_int_or_hex")]
    pub transaction_index: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub removed: bool,
}

impl Log {
    /// First topic, the event selector for non-anonymous events.
    pub fn topic0(&self) -> Option<&str> {
        self.topics.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_contract_creation() {
        let json = r#"{"hash": "0x1", "from": "0xaa", "to": null, "nonce": "0x2"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.to, None, "contract creation has no recipient");
        assert_eq!(tx.nonce, 2);
    }

    #[test]
    fn test_log_fields() {
        let json = r#"{
            "address": "0xdac17f958d2ee523a2206206994597c13d831ec7",
            "topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"],
            "data": "0x",
            "logIndex": "0x3",
            "blockNumber": 100,
            "removed": false
        }"#;
        let log: Log = serde_json::from_str(json).unwrap();
        assert_eq!(log.log_index, Some(3));
        assert_eq!(log.block_number, Some(100));
        assert_eq!(log.transaction_index, None);
        assert!(log.topic0().is_some_and(|t| t.starts_with("0xddf252ad")));
    }
}
