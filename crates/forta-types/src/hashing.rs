//! Keccak-256 helpers used for event topics, JWT digests and selectors.

use sha3::{Digest, Keccak256};

use crate::errors::ValidationError;

/// Keccak-256 of raw bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 of a UTF-8 string, rendered as lowercase `0x` hex.
pub fn keccak256_hex(text: &str) -> String {
    format!("0x{}", hex::encode(keccak256(text.as_bytes())))
}

/// EIP-55 mixed-case checksum form of a 20-byte address.
///
/// Accepts any casing, with or without `0x`.
pub fn to_checksum_address(address: &str) -> Result<String, ValidationError> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address)
        .to_ascii_lowercase();
    let bytes = hex::decode(&digits).map_err(|e| ValidationError::InvalidHex {
        field: "address",
        reason: e.to_string(),
    })?;
    if bytes.len() != 20 {
        return Err(ValidationError::InvalidHex {
            field: "address",
            reason: format!("expected 20 bytes, got {}", bytes.len()),
        });
    }

    let hash = keccak256(digits.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in digits.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
