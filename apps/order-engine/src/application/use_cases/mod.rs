//! Application use cases.

pub mod execution_engine;
pub mod monitor_stops;

pub use execution_engine::{ExecutionEngine, SubmitError};
pub use monitor_stops::{CycleReport, MonitorConfig, StopLossMonitor};
