//! Application services shared between use cases.

mod position_registry;

pub use position_registry::PositionRegistry;
