// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Engine - Rust Core Library
//!
//! Deterministic order execution and stop-loss monitoring engine for the
//! Upstox brokerage API.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects)
//!   - `order_lifecycle`: order requests, the tracked record aggregate and
//!     its forward-only state machine, the ledger port
//!   - `stop_loss`: monitored positions and the trigger rule
//!   - `shared`: identifiers, prices, quantities, timestamps
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: interfaces for external systems (`BrokerPort`,
//!     `InstrumentResolver`)
//!   - `use_cases`: `ExecutionEngine`, `StopLossMonitor`
//!   - `services`: the shared `PositionRegistry`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `broker`: Upstox REST adapter and a scriptable mock
//!   - `instruments`: NSE.json-backed symbol resolver
//!   - `persistence`: in-memory order ledger

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Engine configuration from environment variables.
pub mod config;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order_lifecycle::{
    OrderLedger, OrderRecord, OrderRequest, OrderState, OrderType, Product, StateChange,
    TransactionType, Validity,
};
pub use domain::shared::{BrokerOrderId, InstrumentToken, OrderId, Price, Quantity, Symbol, Timestamp};
pub use domain::stop_loss::{MonitoredPosition, STOP_LOSS_TAG};

// Application re-exports
pub use application::ports::{
    BrokerError, BrokerOrderStatus, BrokerPort, InstrumentResolver, PlaceOrder,
};
pub use application::services::PositionRegistry;
pub use application::use_cases::{
    CycleReport, ExecutionEngine, MonitorConfig, StopLossMonitor, SubmitError,
};

// Infrastructure re-exports
pub use infrastructure::broker::{
    MockBroker, PlaceOutcome, UpstoxBrokerAdapter, UpstoxConfig, UpstoxError,
};
pub use infrastructure::instruments::{InstrumentTableError, JsonInstrumentTable};
pub use infrastructure::persistence::InMemoryLedger;

pub use config::{ConfigError, EngineConfig};
