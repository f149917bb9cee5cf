//! Event ABI declarations and log decoding.
//!
//! Declarations are accepted in human-readable form
//! (`event Transfer(address indexed from, address indexed to, uint256 value)`)
//! or as a JSON ABI fragment. Only static parameter types are supported,
//! since each one occupies exactly one topic or one 32-byte data word.

use std::collections::BTreeMap;
use std::fmt;

use forta_types::{keccak256_hex, to_checksum_address, Log, U256};
use serde::{Deserialize, Serialize};

use crate::error::AbiError;

/// A static ABI parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Bool,
    /// `uint<bits>`, 8 <= bits <= 256, multiple of 8
    Uint(usize),
    /// `bytes<len>`, 1 <= len <= 32
    FixedBytes(usize),
}

impl ParamType {
    pub fn parse(raw: &str) -> Result<Self, AbiError> {
        let unsupported = || AbiError::UnsupportedType(raw.to_string());
        match raw {
            "address" => return Ok(ParamType::Address),
            "bool" => return Ok(ParamType::Bool),
            "uint" => return Ok(ParamType::Uint(256)),
            _ => {}
        }
        if let Some(bits) = raw.strip_prefix("uint") {
            let bits: usize = bits.parse().map_err(|_| unsupported())?;
            if bits == 0 || bits > 256 || bits % 8 != 0 {
                return Err(unsupported());
            }
            return Ok(ParamType::Uint(bits));
        }
        if let Some(len) = raw.strip_prefix("bytes") {
            let len: usize = len.parse().map_err(|_| unsupported())?;
            if len == 0 || len > 32 {
                return Err(unsupported());
            }
            return Ok(ParamType::FixedBytes(len));
        }
        Err(unsupported())
    }

    /// Decode one 32-byte word, rejecting non-canonical padding.
    fn decode(self, word: &[u8; 32]) -> Option<AbiValue> {
        match self {
            ParamType::Address => {
                if word[..12].iter().any(|b| *b != 0) {
                    return None;
                }
                let address = to_checksum_address(&hex::encode(&word[12..])).ok()?;
                Some(AbiValue::Address(address))
            }
            ParamType::Bool => match (word[..31].iter().all(|b| *b == 0), word[31]) {
                (true, 0) => Some(AbiValue::Bool(false)),
                (true, 1) => Some(AbiValue::Bool(true)),
                _ => None,
            },
            ParamType::Uint(bits) => {
                let value = U256::from_big_endian(word);
                if bits < 256 && value.bits() > bits {
                    return None;
                }
                Some(AbiValue::Uint(value))
            }
            ParamType::FixedBytes(len) => Some(AbiValue::FixedBytes(word[..len].to_vec())),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::FixedBytes(len) => write!(f, "bytes{len}"),
        }
    }
}

/// A decoded argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AbiValue {
    /// Checksummed address
    Address(String),
    Bool(bool),
    Uint(U256),
    FixedBytes(#[serde(serialize_with = "hex_bytes")] Vec<u8>),
}

fn hex_bytes<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

impl AbiValue {
    pub fn as_address(&self) -> Option<&str> {
        match self {
            AbiValue::Address(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParam {
    pub name: String,
    pub kind: ParamType,
    pub indexed: bool,
}

/// A parsed, non-anonymous event declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAbi {
    pub name: String,
    pub inputs: Vec<EventParam>,
}

#[derive(Deserialize)]
struct JsonFragment {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: String,
    #[serde(default)]
    anonymous: bool,
    #[serde(default)]
    inputs: Vec<JsonParam>,
}

#[derive(Deserialize)]
struct JsonParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    indexed: bool,
}

impl EventAbi {
    /// Parse a human-readable declaration or a JSON fragment.
    pub fn parse(declaration: &str) -> Result<Self, AbiError> {
        let trimmed = declaration.trim();
        if trimmed.starts_with('{') {
            Self::parse_json(trimmed)
        } else {
            Self::parse_human(trimmed)
        }
    }

    fn parse_json(json: &str) -> Result<Self, AbiError> {
        let fragment: JsonFragment =
            serde_json::from_str(json).map_err(|e| AbiError::Malformed(e.to_string()))?;
        if fragment.kind.as_deref().is_some_and(|k| k != "event") {
            return Err(AbiError::Malformed(format!(
                "fragment {} is not an event",
                fragment.name
            )));
        }
        if fragment.anonymous {
            return Err(AbiError::Anonymous);
        }
        let inputs = fragment
            .inputs
            .into_iter()
            .map(|p| {
                Ok(EventParam {
                    name: p.name,
                    kind: ParamType::parse(&p.kind)?,
                    indexed: p.indexed,
                })
            })
            .collect::<Result<Vec<_>, AbiError>>()?;
        Self::validated(fragment.name, inputs)
    }

    fn parse_human(text: &str) -> Result<Self, AbiError> {
        let body = text.strip_prefix("event ").unwrap_or(text).trim();
        let open = body
            .find('(')
            .ok_or_else(|| AbiError::Malformed(format!("missing '(' in {text:?}")))?;
        let close = body
            .rfind(')')
            .ok_or_else(|| AbiError::Malformed(format!("missing ')' in {text:?}")))?;
        if close < open {
            return Err(AbiError::Malformed(text.to_string()));
        }
        match body[close + 1..].trim() {
            "" => {}
            "anonymous" => return Err(AbiError::Anonymous),
            rest => return Err(AbiError::Malformed(format!("unexpected {rest:?}"))),
        }

        let name = body[..open].trim().to_string();
        let params = body[open + 1..close].trim();
        let mut inputs = Vec::new();
        if !params.is_empty() {
            for param in params.split(',') {
                inputs.push(parse_human_param(param.trim(), text)?);
            }
        }
        Self::validated(name, inputs)
    }

    fn validated(name: String, inputs: Vec<EventParam>) -> Result<Self, AbiError> {
        let valid_name = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(AbiError::Malformed(format!("invalid event name {name:?}")));
        }
        if inputs.iter().filter(|p| p.indexed).count() > 3 {
            return Err(AbiError::Malformed(format!("{name} has more than 3 indexed params")));
        }
        Ok(Self { name, inputs })
    }

    /// Canonical signature, e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|p| p.kind.to_string()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// `keccak256(signature)`, the expected first topic.
    pub fn topic(&self) -> String {
        keccak256_hex(&self.signature())
    }

    /// Decode a log emitted by this event, or `None` if it does not match.
    pub fn decode_log(&self, log: &Log) -> Option<LogDescription> {
        let topic = self.topic();
        if !log.topic0().is_some_and(|t| t.eq_ignore_ascii_case(&topic)) {
            return None;
        }

        let indexed_count = self.inputs.iter().filter(|p| p.indexed).count();
        if log.topics.len() != indexed_count + 1 {
            return None;
        }
        let data = decode_hex(&log.data)?;
        let data_count = self.inputs.len() - indexed_count;
        if data.len() < data_count * 32 {
            return None;
        }

        let mut topics = log.topics[1..].iter();
        let mut words = data.chunks_exact(32);
        let mut args = BTreeMap::new();
        let mut ordered = Vec::with_capacity(self.inputs.len());
        for param in &self.inputs {
            let word = if param.indexed {
                word32(&decode_hex(topics.next()?)?)?
            } else {
                word32(words.next()?)?
            };
            let value = param.kind.decode(&word)?;
            if !param.name.is_empty() {
                args.insert(param.name.clone(), value.clone());
            }
            ordered.push(value);
        }

        Some(LogDescription {
            name: self.name.clone(),
            signature: self.signature(),
            topic,
            address: log.address.clone(),
            log_index: log.log_index,
            args,
            values: ordered,
        })
    }
}

fn parse_human_param(param: &str, text: &str) -> Result<EventParam, AbiError> {
    let mut tokens = param.split_whitespace();
    let kind = tokens
        .next()
        .ok_or_else(|| AbiError::Malformed(format!("empty parameter in {text:?}")))?;
    let mut indexed = false;
    let mut name = String::new();
    for token in tokens {
        match token {
            "indexed" if !indexed && name.is_empty() => indexed = true,
            other if name.is_empty() => name = other.to_string(),
            other => return Err(AbiError::Malformed(format!("unexpected {other:?} in {param:?}"))),
        }
    }
    Ok(EventParam {
        name,
        kind: ParamType::parse(kind)?,
        indexed,
    })
}

fn decode_hex(value: &str) -> Option<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).ok()
}

fn word32(bytes: &[u8]) -> Option<[u8; 32]> {
    <[u8; 32]>::try_from(bytes).ok()
}

/// A log decoded against an [`EventAbi`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDescription {
    pub name: String,
    pub signature: String,
    pub topic: String,
    /// Emitting contract
    pub address: String,
    pub log_index: Option<u64>,
    /// Named arguments
    pub args: BTreeMap<String, AbiValue>,
    /// All arguments in declaration order
    pub values: Vec<AbiValue>,
}

impl LogDescription {
    pub fn arg(&self, name: &str) -> Option<&AbiValue> {
        self.args.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER: &str = "event Transfer(address indexed from, address indexed to, uint256 value)";
    const TRANSFER_TOPIC: &str =
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

    fn topic_for(address: &str) -> String {
        format!("0x{:0>64}", address.trim_start_matches("0x"))
    }

    fn transfer_log(value: u64) -> Log {
        Log {
            address: "0xdac17f958d2ee523a2206206994597c13d831ec7".into(),
            topics: vec![
                TRANSFER_TOPIC.into(),
                topic_for("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"),
                topic_for("fb6916095ca1df60bb79ce92ce3ea74c37c5d359"),
            ],
            data: format!("0x{value:064x}"),
            log_index: Some(4),
            ..Log::default()
        }
    }

    #[test]
    fn test_parse_human_readable() {
        let abi = EventAbi::parse(TRANSFER).unwrap();
        assert_eq!(abi.name, "Transfer");
        assert_eq!(abi.signature(), "Transfer(address,address,uint256)");
        assert_eq!(abi.topic(), TRANSFER_TOPIC);
        assert!(abi.inputs[0].indexed && !abi.inputs[2].indexed);

        let bare = EventAbi::parse("Approval(address indexed, address indexed, uint value)").unwrap();
        assert_eq!(bare.signature(), "Approval(address,address,uint256)", "uint means uint256");
        assert_eq!(EventAbi::parse("event Ping()").unwrap().signature(), "Ping()");
    }

    #[test]
    fn test_parse_json_fragment() {
        let json = r#"{"name":"Transfer","type":"event","anonymous":false,"inputs":[
            {"indexed":true,"name":"from","type":"address"},
            {"indexed":true,"name":"to","type":"address"},
            {"indexed":false,"name":"value","type":"uint256"}]}"#;
        assert_eq!(EventAbi::parse(json).unwrap(), EventAbi::parse(TRANSFER).unwrap());
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        assert_eq!(
            EventAbi::parse("event Data(string text)"),
            Err(AbiError::UnsupportedType("string".into()))
        );
        assert!(matches!(EventAbi::parse("event Bad(uint7 x)"), Err(AbiError::UnsupportedType(_))));
        assert!(matches!(EventAbi::parse("event Bad(bytes33 x)"), Err(AbiError::UnsupportedType(_))));
        assert_eq!(EventAbi::parse("event Anon(address a) anonymous"), Err(AbiError::Anonymous));
        assert!(matches!(EventAbi::parse("event NoParens"), Err(AbiError::Malformed(_))));
        assert!(matches!(
            EventAbi::parse("event Many(bool indexed a, bool indexed b, bool indexed c, bool indexed d)"),
            Err(AbiError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_transfer() {
        let abi = EventAbi::parse(TRANSFER).unwrap();
        let decoded = abi.decode_log(&transfer_log(25_000_000_000)).unwrap();

        assert_eq!(
            decoded.arg("from").and_then(AbiValue::as_address),
            Some("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
        );
        assert_eq!(
            decoded.arg("to").and_then(AbiValue::as_address),
            Some("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359")
        );
        assert_eq!(
            decoded.arg("value").and_then(AbiValue::as_uint),
            Some(U256::from(25_000_000_000u64))
        );
        assert_eq!(decoded.values.len(), 3);
        assert_eq!(decoded.log_index, Some(4));
    }

    #[test]
    fn test_decode_skips_mismatches() {
        let abi = EventAbi::parse(TRANSFER).unwrap();

        let mut other_event = transfer_log(1);
        other_event.topics[0] = keccak256_hex("Approval(address,address,uint256)");
        assert!(abi.decode_log(&other_event).is_none());

        let mut erc721_style = transfer_log(1);
        erc721_style.topics.push(topic_for("01"));
        assert!(abi.decode_log(&erc721_style).is_none(), "topic count must match");

        let mut short_data = transfer_log(1);
        short_data.data = "0x".into();
        assert!(abi.decode_log(&short_data).is_none());

        let mut dirty_address = transfer_log(1);
        dirty_address.topics[1] = format!("0x{}", "ff".repeat(32));
        assert!(abi.decode_log(&dirty_address).is_none(), "address padding must be zero");
    }

    #[test]
    fn test_decode_small_types() {
        let abi = EventAbi::parse("event Flag(bool indexed on, uint8 level, bytes4 tag)").unwrap();
        let log = Log {
            topics: vec![abi.topic(), format!("0x{:064x}", 1)],
            data: format!("0x{:064x}{}{}", 7, "deadbeef", "0".repeat(56)),
            ..Log::default()
        };
        let decoded = abi.decode_log(&log).unwrap();
        assert_eq!(decoded.arg("on").and_then(AbiValue::as_bool), Some(true));
        assert_eq!(decoded.arg("level").and_then(AbiValue::as_uint), Some(U256::from(7)));
        assert_eq!(decoded.arg("tag"), Some(&AbiValue::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef])));

        let overflow = Log {
            data: format!("0x{:064x}{}", 256, "0".repeat(64)),
            ..log
        };
        assert!(abi.decode_log(&overflow).is_none(), "256 does not fit in uint8");
    }
}
