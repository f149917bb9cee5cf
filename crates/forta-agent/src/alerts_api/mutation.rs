//! `SendAlerts` mutation.

use forta_types::Finding;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub(crate) const SEND_ALERTS_MUTATION: &str = r#"
mutation SendAlerts($alerts: [AlertRequestInput!]!) {
    sendAlerts(alerts: $alerts) {
        alerts {
            alertHash
            error { code message }
        }
    }
}
"#;

/// A finding to publish under `bot_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SendAlertsInput {
    pub bot_id: String,
    pub finding: Finding,
}

/// Outcome for one input, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendAlertsResponse {
    pub alert_hash: Option<String>,
    pub error: Option<SendAlertError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SendAlertError {
    pub code: String,
    pub message: String,
}

/// Request body for `inputs`.
pub(crate) fn to_request(inputs: &[SendAlertsInput], private: bool) -> Value {
    let alerts: Vec<Value> = inputs
        .iter()
        .map(|input| {
            serde_json::json!({
                "botId": input.bot_id,
                "finding": alert_request_finding(&input.finding, private),
            })
        })
        .collect();
    serde_json::json!({
        "query": SEND_ALERTS_MUTATION,
        "variables": { "alerts": alerts },
    })
}

/// Finding JSON in the `AlertRequestInput` shape.
///
/// Enum values are upper-cased, `protocol` is dropped, and empty values are
/// removed from the finding and from each label.
pub fn alert_request_finding(finding: &Finding, private: bool) -> Value {
    let Value::Object(mut object) = finding.to_value() else {
        return Value::Null;
    };

    upper_case(&mut object, "type");
    upper_case(&mut object, "severity");
    object.remove("protocol");
    object.retain(|_, value| !is_empty_value(value));

    if let Some(Value::Array(labels)) = object.get_mut("labels") {
        for label in labels.iter_mut().filter_map(Value::as_object_mut) {
            upper_case(label, "entityType");
            label.retain(|_, value| !is_empty_value(value));
        }
    }

    object.insert("private".into(), Value::Bool(private));
    Value::Object(object)
}

fn upper_case(object: &mut Map<String, Value>, key: &str) {
    if let Some(Value::String(s)) = object.get_mut(key) {
        *s = s.to_uppercase();
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
