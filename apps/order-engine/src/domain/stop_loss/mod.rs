//! Stop-Loss Bounded Context
//!
//! Monitored positions and the trigger rule that decides when an open long
//! position is liquidated.

pub mod monitored_position;
pub mod trigger;

pub use monitored_position::{MonitoredPosition, STOP_LOSS_TAG};
pub use trigger::breaches_stop;
