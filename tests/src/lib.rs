//! # Forta Agent SDK Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/  # Cross-crate flows (events → agent → API)
//! └── benches/          # Bloom filter query and encode throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p forta-tests
//! cargo bench -p forta-tests
//! ```

pub mod integration;
