//! Integer normalization for JSON boundaries.
//!
//! Node and API payloads encode the same quantity either as a JSON number or
//! as a string. [`int_or_hex`] reads strings as decimal (`"3379"`) unless
//! they carry a `0x` prefix. [`hex_or_int`] reads every string as hex, with
//! or without the prefix (`"d33"`, `"0xd33"`), which is how bloom filter
//! descriptors are written. Everything past the boundary sees a plain `u64`.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

use crate::errors::ValidationError;

/// Parse a decimal or `0x`-prefixed hex string into a `u64`.
pub fn parse_u64(field: &'static str, value: &str) -> Result<u64, ValidationError> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => trimmed.parse::<u64>(),
    };

    parsed.map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parse a base-16 string into a `u64`, with or without a `0x` prefix.
pub fn parse_hex_u64(field: &'static str, value: &str) -> Result<u64, ValidationError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    u64::from_str_radix(digits, 16).map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Render a `u64` the way JSON-RPC nodes do (`0x`-prefixed, no leading zeros).
pub fn to_hex_quantity(value: u64) -> String {
    format!("{value:#x}")
}

struct U64Visitor;

impl<'de> Visitor<'de> for U64Visitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal/0x-hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative value {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        parse_u64("number", v).map_err(E::custom)
    }
}

/// `#[serde(with = "numeric::int_or_hex")]` for `u64` fields.
pub mod int_or_hex {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(U64Visitor)
    }

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }
}

/// `#[serde(with = "numeric::hex_or_int")]` for `u64` fields whose string
/// form is always hex.
pub mod hex_or_int {
    use super::*;

    struct HexVisitor;

    impl<'de> Visitor<'de> for HexVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer or a hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative value {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            parse_hex_u64("number", v).map_err(E::custom)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(HexVisitor)
    }

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }
}

/// `#[serde(with = "numeric::opt_int_or_hex")]` for `Option<u64>` fields.
pub mod opt_int_or_hex {
    use super::*;

    struct OptVisitor;

    impl<'de> Visitor<'de> for OptVisitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("null, an unsigned integer, or a decimal/0x-hex string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(U64Visitor).map(Some)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        deserializer.deserialize_option(OptVisitor)
    }

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_u64(*v),
            None => serializer.serialize_none(),
        }
    }
}
