//! Bloom filter descriptor and membership queries
//!
//! INVARIANTS:
//! - `m > 0`, `k > 0`, bitset present (checked at construction)
//! - The bit array is decoded at most once per instance and is either fully
//!   built or absent
//! - No false negatives for keys inserted with matching `(k, m)`

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use forta_types::numeric::hex_or_int;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::bit_set::{BitSet, PayloadHeader};
use super::hash_functions::bit_indices;
use crate::error::FilterError;

/// Wire record for a filter: `k` and `m` may be JSON numbers or hex
/// strings. Strings are base 16 whether or not they carry `0x`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloomFilterParams {
    #[serde(with = "hex_or_int")]
    pub k: u64,
    #[serde(with = "hex_or_int")]
    pub m: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitset: Option<String>,
}

/// Read-only bloom filter over a producer-serialized bit set.
///
/// The base64 payload is kept as given and decoded on the first query.
/// Concurrent first queries race benignly: exactly one decoded array is
/// stored and every caller reads that one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "BloomFilterParams", into = "BloomFilterParams")]
pub struct BloomFilter {
    /// Number of hash functions (k)
    k: u64,
    /// Size in bits (m)
    m: u64,
    /// Base64 payload
    bitset: String,
    bits: OnceCell<BitSet>,
}

impl BloomFilter {
    /// Create a filter from already-normalized parameters.
    pub fn new(m: u64, k: u64, bitset: impl Into<String>) -> Result<Self, FilterError> {
        let bitset = bitset.into();
        if m == 0 {
            return Err(FilterError::InvalidParameters("m must be positive".into()));
        }
        if k == 0 {
            return Err(FilterError::InvalidParameters("k must be positive".into()));
        }
        if bitset.is_empty() {
            return Err(FilterError::MissingBitset);
        }

        Ok(Self {
            k,
            m,
            bitset,
            bits: OnceCell::new(),
        })
    }

    /// Test whether `key` might be in the set.
    ///
    /// Returns `Ok(false)` as soon as one addressed bit is unset. Fails only if
    /// the payload cannot be decoded; the failure repeats on every call.
    pub fn has(&self, key: impl AsRef<[u8]>) -> Result<bool, FilterError> {
        let bits = self.bit_set()?;
        Ok(bit_indices(key.as_ref(), self.k, self.m)?.all(|index| bits.contains(index)))
    }

    /// The decoded bit array, decoding it on first use.
    pub fn bit_set(&self) -> Result<&BitSet, FilterError> {
        self.bits.get_or_try_init(|| self.decode())
    }

    /// Whether the bit array has been materialized.
    pub fn is_decoded(&self) -> bool {
        self.bits.get().is_some()
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> u64 {
        self.k
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> u64 {
        self.m
    }

    /// The base64 payload as supplied.
    pub fn bitset(&self) -> &str {
        &self.bitset
    }

    fn decode(&self) -> Result<BitSet, FilterError> {
        let payload = STANDARD.decode(self.bitset.as_bytes())?;

        if let Some(header) = PayloadHeader::read(&payload) {
            if header.m != self.m || header.k != self.k || header.len != self.m {
                warn!(
                    m = self.m,
                    k = self.k,
                    header_m = header.m,
                    header_k = header.k,
                    header_len = header.len,
                    "bloom filter header disagrees with descriptor"
                );
            }
        }

        let bits = BitSet::decode(&payload, self.m)?;
        debug!(m = self.m, k = self.k, set = bits.count_ones(), "decoded bloom filter");
        Ok(bits)
    }
}

impl PartialEq for BloomFilter {
    fn eq(&self, other: &Self) -> bool {
        self.k == other.k && self.m == other.m && self.bitset == other.bitset
    }
}

impl Eq for BloomFilter {}

impl TryFrom<BloomFilterParams> for BloomFilter {
    type Error = FilterError;

    fn try_from(params: BloomFilterParams) -> Result<Self, Self::Error> {
        let bitset = params.bitset.ok_or(FilterError::MissingBitset)?;
        Self::new(params.m, params.k, bitset)
    }
}

impl From<BloomFilter> for BloomFilterParams {
    fn from(filter: BloomFilter) -> Self {
        Self {
            k: filter.k,
            m: filter.m,
            bitset: Some(filter.bitset),
        }
    }
}
