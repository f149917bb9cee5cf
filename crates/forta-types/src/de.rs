//! Lenient deserializers for API payloads.
//!
//! The GraphQL API returns `null` for absent strings and lists, and label
//! metadata arrives either as an object or as a list of `key=value` strings.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetadata {
    Map(BTreeMap<String, serde_json::Value>),
    List(Vec<String>),
}

/// Metadata as a string map, from an object, a `key=value` list, or `null`.
///
/// Non-string object values are kept in their JSON rendering.
pub fn metadata_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMetadata>::deserialize(deserializer)?;
    Ok(match raw {
        None => BTreeMap::new(),
        Some(RawMetadata::Map(map)) => map
            .into_iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect(),
        Some(RawMetadata::List(items)) => items
            .into_iter()
            .map(|item| match item.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (item, String::new()),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "metadata_map")]
        metadata: BTreeMap<String, String>,
    }

    #[test]
    fn test_null_strings_become_empty() {
        let p: Record = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(p.name, "");
        assert!(p.metadata.is_empty());
    }

    #[test]
    fn test_metadata_shapes() {
        let p: Record =
            serde_json::from_str(r#"{"metadata": {"to": "0xabc", "count": 3}}"#).unwrap();
        assert_eq!(p.metadata.get("to").map(String::as_str), Some("0xabc"));
        assert_eq!(p.metadata.get("count").map(String::as_str), Some("3"));

        let p: Record = serde_json::from_str(r#"{"metadata": ["a=1", "flag"]}"#).unwrap();
        assert_eq!(p.metadata.get("a").map(String::as_str), Some("1"));
        assert_eq!(p.metadata.get("flag").map(String::as_str), Some(""));
    }
}
