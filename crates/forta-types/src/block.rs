//! Block as returned by a JSON-RPC node.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::numeric::int_or_hex;

/// A block header plus the hashes of its transactions and uncles.
///
/// `number` and `timestamp` arrive as either JSON numbers or hex quantities.
/// The remaining quantities stay as the strings the node returned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    #[serde(deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub extra_data: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_limit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gas_used: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logs_bloom: String,
    #[serde(deserialize_with = "null_as_default")]
    pub miner: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mix_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nonce: String,
    #[serde(with = "int_or_hex")]
    pub number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub receipts_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sha3_uncles: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state_root: String,
    #[serde(with = "int_or_hex")]
    pub timestamp: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_difficulty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transactions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub transactions_root: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uncles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_from_node_json() {
        let json = r#"{
            "hash": "0xabc",
            "number": "0x10d4f",
            "timestamp": 1638316800,
            "parentHash": "0x123",
            "miner": null,
            "transactions": ["0x01", "0x02"]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.number, 68943, "hex block number must be normalized");
        assert_eq!(block.timestamp, 1_638_316_800);
        assert_eq!(block.parent_hash, "0x123");
        assert_eq!(block.miner, "", "null strings become empty");
        assert_eq!(block.transactions.len(), 2);
        assert!(block.uncles.is_empty());
    }

    #[test]
    fn test_block_rejects_bad_number() {
        let json = r#"{"number": "0xnope"}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }
}
