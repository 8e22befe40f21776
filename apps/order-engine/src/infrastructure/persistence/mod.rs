//! Persistence adapters for the order ledger.

mod in_memory;

pub use in_memory::InMemoryLedger;
