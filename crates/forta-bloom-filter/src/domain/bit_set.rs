//! Packed bit array read from a serialized filter payload.

use bitvec::prelude::*;

use crate::error::FilterError;

/// Bytes of header preceding the words: `m`, `k`, `m` as big-endian `u64`.
pub const HEADER_LEN: usize = 24;

/// Decoded header of a serialized filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    pub m: u64,
    pub k: u64,
    /// Bit set length, written again by the producer's bit set encoder.
    pub len: u64,
}

impl PayloadHeader {
    /// Read the header, or `None` if the payload is shorter than the header.
    pub fn read(payload: &[u8]) -> Option<Self> {
        let header = payload.get(..HEADER_LEN)?;
        let mut words = header.chunks_exact(8).map(be_word);
        Some(Self {
            m: words.next()?,
            k: words.next()?,
            len: words.next()?,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.m.to_be_bytes());
        out.extend_from_slice(&self.k.to_be_bytes());
        out.extend_from_slice(&self.len.to_be_bytes());
    }
}

fn be_word(chunk: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(chunk);
    u64::from_be_bytes(buf)
}

/// Number of 64-bit words needed to hold `m` bits.
pub fn word_count(m: u64) -> Result<usize, FilterError> {
    usize::try_from(m.div_ceil(64))
        .map_err(|_| FilterError::InvalidParameters(format!("m={m} does not fit in memory")))
}

/// Read-only bit array of `m` bits stored as `u64` words, least significant
/// bit first within each word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSet {
    bits: BitVec<u64, Lsb0>,
    m: u64,
}

impl BitSet {
    /// Wrap already-decoded words.
    pub fn from_words(words: Vec<u64>, m: u64) -> Self {
        Self {
            bits: BitVec::from_vec(words),
            m,
        }
    }

    /// Decode a raw (already base64-decoded) payload for an `m`-bit filter.
    ///
    /// The header is skipped, then `ceil(m / 64)` big-endian words are read.
    /// Trailing bytes beyond those words are ignored.
    pub fn decode(payload: &[u8], m: u64) -> Result<Self, FilterError> {
        let words = word_count(m)?;
        let expected = words
            .checked_mul(8)
            .and_then(|body| body.checked_add(HEADER_LEN))
            .ok_or_else(|| FilterError::InvalidParameters(format!("m={m} is too large")))?;

        if payload.len() < expected {
            return Err(FilterError::InsufficientData {
                expected,
                actual: payload.len(),
            });
        }

        let body = &payload[HEADER_LEN..expected];
        let decoded: Vec<u64> = body.chunks_exact(8).map(be_word).collect();
        Ok(Self::from_words(decoded, m))
    }

    /// Whether bit `index` is set. Indices at or beyond `m` read as unset.
    pub fn contains(&self, index: u64) -> bool {
        if index >= self.m {
            return false;
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| self.bits.get(i).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// Size in bits (m)
    pub fn size_bits(&self) -> u64 {
        self.m
    }

    /// Number of set bits among the first `m`.
    pub fn count_ones(&self) -> usize {
        let m = usize::try_from(self.m).unwrap_or(usize::MAX).min(self.bits.len());
        self.bits[..m].count_ones()
    }

    /// Backing words in payload order.
    pub fn words(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }
}
