//! Labels attached to findings and alerts.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::de::{metadata_map, null_as_default};
use crate::errors::ValidationError;

/// Kind of entity a label describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityType {
    #[default]
    Unknown,
    Address,
    Transaction,
    Block,
    Url,
}

impl EntityType {
    const ALL: [EntityType; 5] = [
        EntityType::Unknown,
        EntityType::Address,
        EntityType::Transaction,
        EntityType::Block,
        EntityType::Url,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Unknown => "Unknown",
            EntityType::Address => "Address",
            EntityType::Transaction => "Transaction",
            EntityType::Block => "Block",
            EntityType::Url => "Url",
        }
    }

    /// Name in the GraphQL enum convention (`ADDRESS`).
    pub fn as_graphql(self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

const ENTITY_TYPE_NAMES: &[&str] = &["Unknown", "Address", "Transaction", "Block", "Url"];

struct EntityTypeVisitor;

impl<'de> Visitor<'de> for EntityTypeVisitor {
    type Value = EntityType;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an entity type name or ordinal")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityType, E> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(v))
            .ok_or_else(|| E::unknown_variant(v, ENTITY_TYPE_NAMES))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityType, E> {
        usize::try_from(v)
            .ok()
            .and_then(|i| EntityType::ALL.get(i).copied())
            .ok_or_else(|| E::custom(format!("entity type ordinal out of range: {v}")))
    }
}

impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntityTypeVisitor)
    }
}

/// A label asserting something about an entity (e.g. "attacker" for an address).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(default)]
    pub entity_type: EntityType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    /// Set when the label retracts a previously emitted one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub remove: bool,
    #[serde(default, deserialize_with = "metadata_map")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unique_key: String,
}

impl Label {
    /// Create a validated label.
    pub fn new(
        entity_type: EntityType,
        entity: impl Into<String>,
        label: impl Into<String>,
        confidence: f64,
    ) -> Result<Self, ValidationError> {
        let label = Self {
            entity_type,
            entity: entity.into(),
            label: label.into(),
            confidence,
            ..Self::default()
        };
        label.validate()?;
        Ok(label)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_unique_key(mut self, key: impl Into<String>) -> Self {
        self.unique_key = key.into();
        self
    }

    pub fn removing(mut self) -> Self {
        self.remove = true;
        self
    }

    /// Check that `entity` and `label` are non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.entity.is_empty() {
            return Err(ValidationError::EmptyField { field: "entity" });
        }
        if self.label.is_empty() {
            return Err(ValidationError::EmptyField { field: "label" });
        }
        Ok(())
    }
}
