//! `fetchAlerts` query.

use chrono::NaiveDate;
use forta_types::numeric::int_or_hex;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::alert::Alert;

pub(crate) const FETCH_ALERTS_OPERATION: &str = "fetchAlerts";

pub(crate) const FETCH_ALERTS_QUERY: &str = r#"
query fetchAlerts(
    $bots: [String],
    $addresses: [String],
    $after: AlertEndCursorInput,
    $alertHash: String,
    $alertName: String,
    $alertId: String,
    $alertIds: [String],
    $chainId: NonNegativeInt,
    $first: NonNegativeInt,
    $projectId: String,
    $scanNodeConfirmations: scanNodeFilters,
    $severities: [String],
    $transactionHash: String,
    $blockSortDirection: Sort,
    $createdSince: NonNegativeInt,
    $createdBefore: NonNegativeInt,
    $blockDateRange: DateRange,
    $blockNumberRange: BlockRange
) {
    alerts(input: {
        bots: $bots,
        addresses: $addresses,
        after: $after,
        alertHash: $alertHash,
        alertName: $alertName,
        alertId: $alertId,
        alertIds: $alertIds,
        chainId: $chainId,
        projectId: $projectId,
        scanNodeConfirmations: $scanNodeConfirmations,
        severities: $severities,
        transactionHash: $transactionHash,
        blockSortDirection: $blockSortDirection,
        first: $first,
        createdSince: $createdSince,
        createdBefore: $createdBefore,
        blockDateRange: $blockDateRange,
        blockNumberRange: $blockNumberRange
    }) {
        alerts {
            alertId
            addresses
            contracts { address name projectId }
            createdAt
            description
            hash
            metadata
            name
            projects { id }
            protocol
            scanNodeCount
            severity
            source {
                transactionHash
                bot {
                    chainIds createdAt description developer docReference enabled
                    id image name reference repository projects scanNodes version
                }
                block { number hash timestamp chainId }
                sourceAlert { hash botId timestamp chainId }
            }
            alertDocumentType
            findingType
            relatedAlerts
            chainId
            labels { label confidence entity entityType remove metadata uniqueKey }
            addressBloomFilter { bitset k m }
        }
        pageInfo {
            hasNextPage
            endCursor { alertId blockNumber }
        }
    }
}
"#;

/// Position to resume paging from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCursor {
    pub alert_id: String,
    #[serde(with = "int_or_hex")]
    pub block_number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanNodeConfirmations {
    pub gte: u64,
    pub lte: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Desc,
    Asc,
}

/// Inclusive range of block dates, sent as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDateRange {
    #[serde(serialize_with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "calendar_date")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNumberRange {
    pub start_block_number: u64,
    pub end_block_number: u64,
}

/// Filters for [`AlertsClient::get_alerts`](super::AlertsClient::get_alerts).
///
/// Unset options are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQueryOptions {
    #[serde(rename = "bots", skip_serializing_if = "Option::is_none")]
    pub bot_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(rename = "after", skip_serializing_if = "Option::is_none")]
    pub starting_cursor: Option<AlertCursor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Maximum number of alerts in the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_node_confirmations: Option<ScanNodeConfirmations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_sort_direction: Option<SortDirection>,
    /// Milliseconds before now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_since: Option<u64>,
    /// Milliseconds before now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_date_range: Option<BlockDateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number_range: Option<BlockNumberRange>,
}

impl AlertQueryOptions {
    /// GraphQL `variables` object.
    pub fn to_variables(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }

    /// Full request body.
    pub fn to_request(&self) -> Value {
        serde_json::json!({
            "operationName": FETCH_ALERTS_OPERATION,
            "query": FETCH_ALERTS_QUERY,
            "variables": self.to_variables(),
        })
    }
}

/// One page of alerts.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsResponse {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<AlertCursor>,
}

fn calendar_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}
