//! Alerts as returned by the Forta API.
//!
//! Every field is optional: the API omits or nulls whatever the query did not
//! select or the producer did not set.

use std::collections::BTreeMap;

use forta_bloom_filter::{BloomFilter, BloomFilterParams, FilterError};
use forta_types::de::{metadata_map, null_as_default};
use forta_types::numeric::opt_int_or_hex;
use forta_types::Label;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    pub addresses: Option<Vec<String>>,
    pub alert_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub contracts: Vec<AlertContract>,
    pub created_at: Option<String>,
    pub description: Option<String>,
    pub finding_type: Option<String>,
    pub name: Option<String>,
    pub hash: Option<String>,
    pub protocol: Option<String>,
    pub severity: Option<String>,
    #[serde(deserialize_with = "metadata_map")]
    pub metadata: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(with = "opt_int_or_hex")]
    pub scan_node_count: Option<u64>,
    pub alert_document_type: Option<String>,
    pub related_alerts: Option<Vec<String>>,
    #[serde(with = "opt_int_or_hex")]
    pub chain_id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    pub source: Option<AlertSource>,
    pub address_bloom_filter: Option<AddressBloomFilter>,
}

impl Alert {
    /// Whether `address` is among the alert's addresses.
    ///
    /// Uses the bloom filter when the alert carries one (possible false
    /// positives), otherwise the plain address list. Comparison is exact, so
    /// callers pass addresses in the casing the producer used.
    pub fn has_address(&self, address: &str) -> Result<bool, FilterError> {
        if let Some(filter) = &self.address_bloom_filter {
            return filter.has(address);
        }
        Ok(self
            .addresses
            .as_ref()
            .is_some_and(|addresses| addresses.iter().any(|a| a == address)))
    }
}

/// An alert's `addressBloomFilter` as received.
///
/// Parsing only reads `k`, `m` and `bitset`. The filter is built and checked
/// on the first query, so a degenerate descriptor fails that alert's
/// `has_address` instead of the response it arrived in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "BloomFilterParams", into = "BloomFilterParams")]
pub struct AddressBloomFilter {
    params: BloomFilterParams,
    filter: OnceCell<BloomFilter>,
}

impl AddressBloomFilter {
    /// The descriptor exactly as the API sent it.
    pub fn params(&self) -> &BloomFilterParams {
        &self.params
    }

    /// The validated filter, built on first use. Failures are not cached.
    pub fn filter(&self) -> Result<&BloomFilter, FilterError> {
        self.filter
            .get_or_try_init(|| BloomFilter::try_from(self.params.clone()))
    }

    /// Test whether `key` might be in the set.
    pub fn has(&self, key: impl AsRef<[u8]>) -> Result<bool, FilterError> {
        self.filter()?.has(key)
    }
}

impl PartialEq for AddressBloomFilter {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl From<BloomFilterParams> for AddressBloomFilter {
    fn from(params: BloomFilterParams) -> Self {
        Self {
            params,
            filter: OnceCell::new(),
        }
    }
}

impl From<BloomFilter> for AddressBloomFilter {
    fn from(filter: BloomFilter) -> Self {
        Self {
            params: filter.clone().into(),
            filter: OnceCell::with_value(filter),
        }
    }
}

impl From<AddressBloomFilter> for BloomFilterParams {
    fn from(filter: AddressBloomFilter) -> Self {
        filter.params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertContract {
    pub address: Option<String>,
    pub name: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub contacts: Option<ProjectContacts>,
    pub website: Option<String>,
    pub token: Option<ProjectToken>,
    pub social: Option<ProjectSocial>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectContacts {
    pub security_email_address: Option<String>,
    pub general_email_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectToken {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u32>,
    #[serde(with = "opt_int_or_hex")]
    pub chain_id: Option<u64>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSocial {
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub everest: Option<String>,
    pub coingecko: Option<String>,
}

/// Where an alert came from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertSource {
    pub transaction_hash: Option<String>,
    pub block: Option<SourceBlock>,
    pub bot: Option<SourceBot>,
    pub source_alert: Option<SourceAlert>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceBlock {
    pub timestamp: Option<String>,
    #[serde(with = "opt_int_or_hex")]
    pub chain_id: Option<u64>,
    pub hash: Option<String>,
    #[serde(with = "opt_int_or_hex")]
    pub number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceBot {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub image: Option<String>,
}

/// The alert that triggered this one, for combiner bots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceAlert {
    pub hash: Option<String>,
    pub bot_id: Option<String>,
    pub timestamp: Option<String>,
    #[serde(with = "opt_int_or_hex")]
    pub chain_id: Option<u64>,
}
