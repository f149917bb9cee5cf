//! Producer side of the filter format
//!
//! Builds payloads in the same layout the alert producer writes, so filters
//! can be constructed for tests and tooling without the producer.

use std::f64::consts::LN_2;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bitvec::prelude::*;

use super::bit_set::{word_count, PayloadHeader};
use super::bloom_filter::{BloomFilter, BloomFilterParams};
use super::hash_functions::bit_indices;
use crate::error::FilterError;

/// Mutable `(m, k)` bloom filter that serializes to the wire format.
#[derive(Clone, Debug)]
pub struct FilterEncoder {
    bits: BitVec<u64, Lsb0>,
    m: u64,
    k: u64,
}

impl FilterEncoder {
    /// Create an empty filter with explicit parameters.
    pub fn new(m: u64, k: u64) -> Result<Self, FilterError> {
        if m == 0 || k == 0 {
            return Err(FilterError::InvalidParameters(format!(
                "m and k must be positive (m={m}, k={k})"
            )));
        }
        let words = word_count(m)?;
        Ok(Self {
            bits: BitVec::from_vec(vec![0u64; words]),
            m,
            k,
        })
    }

    /// Create an empty filter sized for `n` keys at false positive rate `fpr`.
    ///
    /// - m = ceil(-n * ln(fpr) / ln(2)^2)
    /// - k = ceil(ln(2) * m / n)
    pub fn with_estimates(n: usize, fpr: f64) -> Result<Self, FilterError> {
        if n == 0 || !(fpr > 0.0 && fpr < 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "need n > 0 and 0 < fpr < 1 (n={n}, fpr={fpr})"
            )));
        }
        let (m, k) = estimate_parameters(n, fpr);
        Self::new(m, k)
    }

    /// Add a key.
    pub fn insert(&mut self, key: impl AsRef<[u8]>) -> Result<(), FilterError> {
        for index in bit_indices(key.as_ref(), self.k, self.m)? {
            // index < m <= bits.len()
            if let Ok(i) = usize::try_from(index) {
                self.bits.set(i, true);
            }
        }
        Ok(())
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> u64 {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> u64 {
        self.k
    }

    /// Raw payload: header then big-endian words.
    pub fn to_bytes(&self) -> Vec<u8> {
        let words = self.bits.as_raw_slice();
        let mut out = Vec::with_capacity(24 + words.len() * 8);
        PayloadHeader {
            m: self.m,
            k: self.k,
            len: self.m,
        }
        .write(&mut out);
        for word in words {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Base64 payload, as carried in `addressBloomFilter.bitset`.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Wire record for the current contents.
    pub fn to_params(&self) -> BloomFilterParams {
        BloomFilterParams {
            k: self.k,
            m: self.m,
            bitset: Some(self.to_base64()),
        }
    }

    /// Read-only filter over the current contents.
    pub fn to_filter(&self) -> Result<BloomFilter, FilterError> {
        BloomFilter::new(self.m, self.k, self.to_base64())
    }
}

fn estimate_parameters(n: usize, fpr: f64) -> (u64, u64) {
    let n = n as f64;
    let m = (-n * fpr.ln() / (LN_2 * LN_2)).ceil();
    let k = (LN_2 * m / n).ceil();
    (m.max(1.0) as u64, k.max(1.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reproduces_small_vector() {
        let mut encoder = FilterEncoder::new(15, 11).unwrap();
        encoder.insert("0x68f180fcce6836688e9084f035309e29bf0a2095").unwrap();

        assert_eq!(
            encoder.to_base64(),
            "AAAAAAAAAA8AAAAAAAAACwAAAAAAAAAPAAAAAAAANtI=",
            "encoder must write the producer's exact layout"
        );
    }

    #[test]
    fn test_no_false_negatives_bulk() {
        let mut encoder = FilterEncoder::with_estimates(500, 0.01).unwrap();
        let keys: Vec<String> = (0..500).map(|i| format!("0x{i:040x}")).collect();
        for key in &keys {
            encoder.insert(key).unwrap();
        }

        let filter = encoder.to_filter().unwrap();
        for key in &keys {
            assert!(filter.has(key).unwrap(), "False negative for {key}");
        }
    }

    #[test]
    fn test_false_positive_rate_bounded() {
        let target_fpr = 0.01;
        let n = 200;
        let mut encoder = FilterEncoder::with_estimates(n, target_fpr).unwrap();
        for i in 0..n {
            encoder.insert(format!("inserted_{i}")).unwrap();
        }
        let filter = encoder.to_filter().unwrap();

        let trials = 20_000;
        let false_positives = (0..trials)
            .filter(|i| filter.has(format!("not_inserted_{i}")).unwrap())
            .count();
        let actual_fpr = false_positives as f64 / trials as f64;

        assert!(
            actual_fpr <= target_fpr * 2.0,
            "Actual FPR {actual_fpr} exceeds 2 * target {target_fpr}"
        );
    }

    #[test]
    fn test_estimates() {
        let (m, k) = estimate_parameters(100, 0.01);
        assert_eq!(m, 959);
        assert_eq!(k, 7);
        assert!(FilterEncoder::with_estimates(0, 0.01).is_err());
        assert!(FilterEncoder::with_estimates(10, 1.5).is_err());
        assert!(FilterEncoder::new(0, 3).is_err());
    }

    proptest! {
        #[test]
        fn prop_inserted_keys_always_present(
            keys in proptest::collection::vec("[0-9a-f]{1,40}", 1..40),
            m in 1u64..4096,
            k in 1u64..16,
        ) {
            let mut encoder = FilterEncoder::new(m, k).unwrap();
            for key in &keys {
                encoder.insert(key).unwrap();
            }
            let filter = encoder.to_filter().unwrap();
            for key in &keys {
                prop_assert!(filter.has(key).unwrap());
            }
        }

        #[test]
        fn prop_hex_and_int_descriptors_agree(m in 1u64..2048, k in 1u64..12, key in ".{0,20}") {
            let mut encoder = FilterEncoder::new(m, k).unwrap();
            encoder.insert("0xfeed").unwrap();
            let bitset = encoder.to_base64();

            let int: BloomFilter = serde_json::from_value(serde_json::json!({
                "k": k, "m": m, "bitset": bitset,
            })).unwrap();
            let hex: BloomFilter = serde_json::from_value(serde_json::json!({
                "k": format!("{k:#x}"), "m": format!("{m:#x}"), "bitset": bitset,
            })).unwrap();
            let bare: BloomFilter = serde_json::from_value(serde_json::json!({
                "k": format!("{k:x}"), "m": format!("{m:x}"), "bitset": bitset,
            })).unwrap();

            prop_assert_eq!(int.has(&key).unwrap(), hex.has(&key).unwrap());
            prop_assert_eq!(int.has(&key).unwrap(), bare.has(&key).unwrap());
        }
    }
}
