//! Order Lifecycle Bounded Context
//!
//! Order requests, the tracked record aggregate with its forward-only state
//! machine, and the ledger port.

pub mod ledger;
pub mod record;
pub mod value_objects;

pub use ledger::{OrderLedger, RecordMutation};
pub use record::{OrderRecord, StateChange};
pub use value_objects::{OrderRequest, OrderState, OrderType, Product, TransactionType, Validity};
