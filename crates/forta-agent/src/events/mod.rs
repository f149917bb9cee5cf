//! Events delivered to agent handlers.

pub mod abi;
pub mod alert_event;
pub mod block_event;
pub mod transaction_event;

pub use abi::{AbiValue, EventAbi, LogDescription, ParamType};
pub use alert_event::AlertEvent;
pub use block_event::BlockEvent;
pub use transaction_event::{TransactionEvent, TxEventBlock};
