//! Shared Kernel
//!
//! Value objects and errors used by every bounded context.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{BrokerOrderId, InstrumentToken, OrderId, Price, Quantity, Symbol, Timestamp};
