//! Domain Layer - Pure computation
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod bit_set;
pub mod bloom_filter;
pub mod encoder;
pub mod hash_functions;

pub use bit_set::BitSet;
pub use bloom_filter::{BloomFilter, BloomFilterParams};
pub use encoder::FilterEncoder;
