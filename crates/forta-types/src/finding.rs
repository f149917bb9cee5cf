//! Findings emitted by agents.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::label::Label;

/// Protocol reported when an input does not name one.
pub const DEFAULT_PROTOCOL: &str = "ethereum";

/// How severe a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum FindingSeverity {
    #[default]
    #[serde(alias = "UNKNOWN")]
    Unknown,
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "LOW")]
    Low,
    #[serde(alias = "MEDIUM")]
    Medium,
    #[serde(alias = "HIGH")]
    High,
    #[serde(alias = "CRITICAL")]
    Critical,
}

impl FindingSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingSeverity::Unknown => "Unknown",
            FindingSeverity::Info => "Info",
            FindingSeverity::Low => "Low",
            FindingSeverity::Medium => "Medium",
            FindingSeverity::High => "High",
            FindingSeverity::Critical => "Critical",
        }
    }
}

/// What kind of activity a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FindingType {
    #[default]
    #[serde(alias = "UNKNOWN")]
    Unknown,
    #[serde(alias = "EXPLOIT")]
    Exploit,
    #[serde(alias = "SUSPICIOUS")]
    Suspicious,
    #[serde(alias = "DEGRADED")]
    Degraded,
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "SCAM")]
    Scam,
}

impl FindingType {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingType::Unknown => "Unknown",
            FindingType::Exploit => "Exploit",
            FindingType::Suspicious => "Suspicious",
            FindingType::Degraded => "Degraded",
            FindingType::Info => "Info",
            FindingType::Scam => "Scam",
        }
    }
}

/// Untrusted input for [`Finding::from_input`].
#[derive(Debug, Clone, Default)]
pub struct FindingInput {
    pub name: String,
    pub description: String,
    pub alert_id: String,
    /// Defaults to [`DEFAULT_PROTOCOL`].
    pub protocol: Option<String>,
    pub severity: FindingSeverity,
    pub finding_type: FindingType,
    pub metadata: BTreeMap<String, String>,
    pub addresses: Vec<String>,
    pub labels: Vec<Label>,
    pub unique_key: Option<String>,
}

/// A validated finding.
///
/// Serializes with enum names (`"severity": "Medium"`), the shape agents
/// report to the scan node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    name: String,
    description: String,
    alert_id: String,
    protocol: String,
    severity: FindingSeverity,
    #[serde(rename = "type")]
    finding_type: FindingType,
    metadata: BTreeMap<String, String>,
    addresses: Vec<String>,
    labels: Vec<Label>,
    unique_key: String,
}

impl Finding {
    /// Validate an input and fill in defaults.
    ///
    /// `name`, `description`, `alert_id` and the protocol must be non-empty,
    /// and every label must be valid.
    pub fn from_input(input: FindingInput) -> Result<Self, ValidationError> {
        let protocol = input
            .protocol
            .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());

        require_non_empty(&input.name, "name")?;
        require_non_empty(&input.description, "description")?;
        require_non_empty(&input.alert_id, "alertId")?;
        require_non_empty(&protocol, "protocol")?;
        for label in &input.labels {
            label.validate()?;
        }

        Ok(Self {
            name: input.name,
            description: input.description,
            alert_id: input.alert_id,
            protocol,
            severity: input.severity,
            finding_type: input.finding_type,
            metadata: input.metadata,
            addresses: input.addresses,
            labels: input.labels,
            unique_key: input.unique_key.unwrap_or_default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn alert_id(&self) -> &str {
        &self.alert_id
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn severity(&self) -> FindingSeverity {
        self.severity
    }

    pub fn finding_type(&self) -> FindingType {
        self.finding_type
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn unique_key(&self) -> &str {
        &self.unique_key
    }

    /// JSON object form of the finding.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}
