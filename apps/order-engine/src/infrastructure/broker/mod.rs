//! Broker adapters.

pub mod mock;
pub mod upstox;

pub use mock::{MockBroker, PlaceOutcome};
pub use upstox::{UpstoxBrokerAdapter, UpstoxConfig, UpstoxError};
