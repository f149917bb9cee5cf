//! Hash functions for the bloom filter
//!
//! Four 64-bit base hashes come from two MurmurHash3 x64/128 evaluations
//! (seed 0) over the key and over the key followed by a single `0x01` byte.
//! Hash function `i` combines them as
//!
//! ```text
//! location(i) = h[i % 2] + i * h[2 + ((i + i % 2) % 4) / 2]   (wrapping u64)
//! index(i)    = location(i) % m
//! ```
//!
//! This must match the producer exactly, including wraparound.

use std::io::Cursor;

use crate::error::FilterError;

/// Low and high 64-bit halves of MurmurHash3 x64/128 with seed 0.
///
/// The hasher reads through `std::io::Read`; its error is passed on rather
/// than replaced with a hash value.
fn murmur_halves(data: &[u8]) -> Result<(u64, u64), FilterError> {
    let hash = murmur3::murmur3_x64_128(&mut Cursor::new(data), 0).map_err(FilterError::Hash)?;
    Ok((hash as u64, (hash >> 64) as u64))
}

/// The four base hashes for a key.
pub fn base_hashes(key: &[u8]) -> Result<[u64; 4], FilterError> {
    let (h1, h2) = murmur_halves(key)?;

    let mut extended = Vec::with_capacity(key.len() + 1);
    extended.extend_from_slice(key);
    extended.push(1);
    let (h3, h4) = murmur_halves(&extended)?;

    Ok([h1, h2, h3, h4])
}

/// Unreduced location for hash function `i`.
pub fn location(hashes: &[u64; 4], i: u64) -> u64 {
    let a = hashes[(i % 2) as usize];
    let b = (i + i % 2) % 4;
    let c = (2 + b / 2) as usize;
    a.wrapping_add(i.wrapping_mul(hashes[c]))
}

/// Lazily derived bit indices for the `k` hash functions of a key.
///
/// The iterator is lazy so membership checks stop at the first unset bit.
pub fn bit_indices(key: &[u8], k: u64, m: u64) -> Result<impl Iterator<Item = u64>, FilterError> {
    let hashes = base_hashes(key)?;
    Ok((0..k).map(move |i| location(&hashes, i) % m))
}
