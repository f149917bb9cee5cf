//! # Forta Bloom Filter
//!
//! Approximate membership test for the address sets carried by alerts
//! (`addressBloomFilter { bitset, k, m }` in the alerts API).
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure computation, no I/O
//!   - `BloomFilter`: validated `{k, m, bitset}` descriptor with a lazily
//!     decoded bit array
//!   - `BitSet`: packed bit array read from the serialized payload
//!   - `hash_functions`: base hashes and bit index derivation
//!   - `FilterEncoder`: producer side, builds payloads the filter can read
//!
//! ## Wire format
//!
//! The base64 payload is three big-endian `u64` header words (`m`, `k`, `m`)
//! followed by `ceil(m / 64)` big-endian `u64` words. Bit `i` lives in word
//! `i >> 6` at position `i & 63` counted from the least significant bit.
//!
//! ## Invariants
//!
//! - `m > 0`, `k > 0`, and a bitset payload is present.
//! - No false negatives: every key inserted by a producer using the same
//!   `(k, m)` answers `true`.
//!
//! ## Usage Example
//!
//! ```
//! use forta_bloom_filter::BloomFilter;
//!
//! let filter = BloomFilter::new(15, 11, "AAAAAAAAAA8AAAAAAAAACwAAAAAAAAAPAAAAAAAANtI=")?;
//! assert!(filter.has("0x68f180fcce6836688e9084f035309e29bf0a2095")?);
//! assert!(!filter.has("a")?);
//! # Ok::<(), forta_bloom_filter::FilterError>(())
//! ```

pub mod domain;
pub mod error;

pub use domain::{BitSet, BloomFilter, BloomFilterParams, FilterEncoder};
pub use error::FilterError;
