//! # Starter Agent
//!
//! Reports Tether transfers above [`TRANSFER_THRESHOLD`] USDT, capped at
//! [`MAX_FINDINGS`] findings for the lifetime of the agent.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use forta_agent::{Agent, AgentError, TransactionEvent};
use forta_types::{Finding, FindingInput, FindingSeverity, FindingType, U256};
use tracing::{debug, info};

pub const ERC20_TRANSFER_EVENT: &str =
    "event Transfer(address indexed from, address indexed to, uint256 value)";
pub const TETHER_ADDRESS: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
pub const TETHER_DECIMALS: u32 = 6;
/// Whole USDT.
pub const TRANSFER_THRESHOLD: u64 = 10_000;
pub const MAX_FINDINGS: usize = 5;

#[derive(Debug, Default)]
pub struct TetherTransferAgent {
    findings_count: AtomicUsize,
}

impl TetherTransferAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn findings_count(&self) -> usize {
        self.findings_count.load(Ordering::SeqCst)
    }

    /// Reserve one finding slot; false once the cap is reached.
    fn reserve_slot(&self) -> bool {
        self.findings_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < MAX_FINDINGS).then_some(n + 1)
            })
            .is_ok()
    }
}

#[async_trait]
impl Agent for TetherTransferAgent {
    async fn handle_transaction(&self, event: &TransactionEvent) -> Result<Vec<Finding>, AgentError> {
        let mut findings = Vec::new();
        let threshold = U256::from(TRANSFER_THRESHOLD) * U256::exp10(TETHER_DECIMALS as usize);

        let transfers = event.filter_log(ERC20_TRANSFER_EVENT, &[TETHER_ADDRESS])?;
        debug!(tx = event.hash(), transfers = transfers.len(), "tether transfers");

        for transfer in transfers {
            let Some(value) = transfer.arg("value").and_then(|v| v.as_uint()) else {
                continue;
            };
            if value <= threshold {
                continue;
            }
            if !self.reserve_slot() {
                break;
            }

            let normalized = format_units(value, TETHER_DECIMALS);
            let mut metadata = BTreeMap::new();
            for key in ["to", "from"] {
                if let Some(address) = transfer.arg(key).and_then(|v| v.as_address()) {
                    metadata.insert(key.to_string(), address.to_string());
                }
            }

            info!(tx = event.hash(), amount = %normalized, "high tether transfer");
            findings.push(Finding::from_input(FindingInput {
                name: "High Tether Transfer".into(),
                description: format!("High amount of USDT transferred: {normalized}"),
                alert_id: "FORTA-1".into(),
                severity: FindingSeverity::Low,
                finding_type: FindingType::Info,
                metadata,
                ..FindingInput::default()
            })?);
        }

        Ok(findings)
    }
}

/// `value / 10^decimals` in decimal, without trailing fractional zeros.
pub fn format_units(value: U256, decimals: u32) -> String {
    let (whole, fraction) = value.div_mod(U256::exp10(decimals as usize));
    if fraction.is_zero() {
        return whole.to_string();
    }
    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forta_types::keccak256_hex;

    fn word(hex_digits: &str) -> String {
        format!("0x{hex_digits:0>64}")
    }

    fn transfer_event(amounts_usdt: &[u64]) -> TransactionEvent {
        let topic = keccak256_hex("Transfer(address,address,uint256)");
        let logs: Vec<_> = amounts_usdt
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                let raw = U256::from(*amount) * U256::exp10(TETHER_DECIMALS as usize);
                serde_json::json!({
                    "address": TETHER_ADDRESS.to_lowercase(),
                    "topics": [topic, word("aa"), word("bb")],
                    "data": word(&format!("{raw:x}")),
                    "logIndex": i,
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "type": 0,
            "network": 1,
            "transaction": {"hash": "0xtx", "from": "0xsender", "to": TETHER_ADDRESS},
            "logs": logs,
            "block": {"hash": "0xblock", "number": 1, "timestamp": 1}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_small_transfer_ignored() {
        let agent = TetherTransferAgent::new();
        let findings = agent.handle_transaction(&transfer_event(&[10_000])).await.unwrap();
        assert!(findings.is_empty(), "threshold is exclusive");
        assert_eq!(agent.findings_count(), 0);
    }

    #[tokio::test]
    async fn test_large_transfer_reported() {
        let agent = TetherTransferAgent::new();
        let findings = agent.handle_transaction(&transfer_event(&[20_000])).await.unwrap();

        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.name(), "High Tether Transfer");
        assert_eq!(finding.description(), "High amount of USDT transferred: 20000");
        assert_eq!(finding.alert_id(), "FORTA-1");
        assert_eq!(finding.severity(), FindingSeverity::Low);
        assert_eq!(finding.finding_type(), FindingType::Info);
        assert_eq!(
            finding.metadata().get("from").map(String::as_str),
            Some("0x00000000000000000000000000000000000000AA")
        );
        assert!(finding.metadata().contains_key("to"));
    }

    #[tokio::test]
    async fn test_findings_capped_across_calls() {
        let agent = TetherTransferAgent::new();
        let first = agent
            .handle_transaction(&transfer_event(&[50_000, 60_000, 70_000]))
            .await
            .unwrap();
        let second = agent
            .handle_transaction(&transfer_event(&[50_000, 60_000, 70_000]))
            .await
            .unwrap();
        let third = agent.handle_transaction(&transfer_event(&[99_000])).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 2, "cap reached mid-transaction");
        assert!(third.is_empty());
        assert_eq!(agent.findings_count(), MAX_FINDINGS);
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(20_000_000_000u64), 6), "20000");
        assert_eq!(format_units(U256::from(10_000_500_000u64), 6), "10000.5");
        assert_eq!(format_units(U256::from(1u64), 6), "0.000001");
    }
}
