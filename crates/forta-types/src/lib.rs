//! # Forta Types Crate
//!
//! Domain entities shared by the bloom filter, the SDK surface, and agents.
//!
//! ## Clusters
//!
//! - **Findings**: `Finding`, `FindingSeverity`, `FindingType`
//! - **Labels**: `Label`, `EntityType`
//! - **Chain**: `Block`, `Transaction`, `Log`, `Network`, `EventType`
//! - **Boundary helpers**: `numeric` (int-or-hex normalization), `hashing`
//!
//! ## Design Principles
//!
//! - JSON arriving from a JSON-RPC node or the GraphQL API is mapped with
//!   serde derive; fields that may be either integers or `0x` strings go
//!   through `numeric` exactly once, at deserialization time.
//! - Constructors that enforce invariants return `ValidationError`.

pub mod block;
pub mod de;
pub mod errors;
pub mod finding;
pub mod hashing;
pub mod label;
pub mod network;
pub mod numeric;
pub mod transaction;

pub use block::Block;
pub use errors::ValidationError;
pub use finding::{Finding, FindingInput, FindingSeverity, FindingType};
pub use hashing::{keccak256, keccak256_hex, to_checksum_address};
pub use label::{EntityType, Label};
pub use network::{EventType, Network};
pub use transaction::{Log, Transaction};

// Re-export U256 for token amounts and ABI words.
pub use primitive_types::U256;
