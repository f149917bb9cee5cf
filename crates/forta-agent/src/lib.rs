//! # Forta Agent SDK
//!
//! Building blocks for detection bots.
//!
//! ## Architecture
//!
//! - **Events** (`events/`): `BlockEvent`, `TransactionEvent`, `AlertEvent`
//!   and the event ABI used by `TransactionEvent::filter_log`
//! - **Alerts** (`alert`): alerts as returned by the Forta API, with
//!   `Alert::has_address` backed by the address bloom filter
//! - **Ports**: `GraphqlTransport` (alerts API), `JwtProvider` and
//!   `ContractCaller` (JWT issuance and verification). Each has an HTTP
//!   adapter and is mocked in tests.
//! - **Agent** (`agent`): the handler trait bots implement
//! - **Config** (`config`): `forta.config.json` and scanner environment
//!
//! ## Usage Example
//!
//! ```ignore
//! use forta_agent::{Agent, AgentError, TransactionEvent};
//! use forta_types::Finding;
//!
//! struct MyBot;
//!
//! #[async_trait::async_trait]
//! impl Agent for MyBot {
//!     async fn handle_transaction(&self, tx: &TransactionEvent) -> Result<Vec<Finding>, AgentError> {
//!         let transfers = tx.filter_log(
//!             "event Transfer(address indexed from, address indexed to, uint256 value)",
//!             &[],
//!         )?;
//!         Ok(Vec::new())
//!     }
//! }
//! ```

pub mod agent;
pub mod alert;
pub mod alerts_api;
pub mod config;
pub mod error;
pub mod events;
pub mod jwt;
pub mod rpc;

pub use agent::{Agent, AlertConfig, BotSubscription, InitializeResponse};
pub use alert::{AddressBloomFilter, Alert};
pub use alerts_api::{
    AlertQueryOptions, AlertsClient, AlertsResponse, GraphqlTransport, HttpTransport, PageInfo,
    SendAlertsInput, SendAlertsResponse,
};
pub use config::{FortaConfig, RuntimeEnv};
pub use error::{AbiError, AgentError, ApiError, ConfigError, JwtError};
pub use events::{AbiValue, AlertEvent, BlockEvent, EventAbi, LogDescription, TransactionEvent};
pub use jwt::{decode_jwt, fetch_jwt, verify_jwt, ContractCaller, DecodedJwt, JwtProvider};

// Re-export the shared data model so bots need a single dependency.
pub use forta_bloom_filter::BloomFilter;
pub use forta_types::{
    Block, EntityType, EventType, Finding, FindingInput, FindingSeverity, FindingType, Label, Log,
    Network, Transaction, U256,
};
