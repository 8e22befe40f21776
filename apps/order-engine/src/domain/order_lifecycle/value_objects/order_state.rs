//! Order lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a tracked order.
///
/// ```text
/// SUBMITTED -> PLACED -> FILLED -> ACTIVE -> STOP_TRIGGERED -> CLOSED
///     |           |                   (only BUYs carrying a stop-loss)
///     |           |         \-> CLOSED  (no stop-loss, or SELL)
///     \-> FAILED  \-> FAILED
/// ```
///
/// A record only moves forward; FAILED and CLOSED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Accepted by the engine, not yet acknowledged by the broker.
    Submitted,
    /// Broker acknowledged placement and assigned an order id.
    Placed,
    /// Broker reported the order completely filled.
    Filled,
    /// Filled BUY with a stop-loss, being watched by the monitor.
    Active,
    /// Stop-loss breached and the exit SELL was placed.
    StopTriggered,
    /// Lifecycle complete, nothing left to do.
    Closed,
    /// Broker rejected the order.
    Failed,
}

impl OrderState {
    /// Returns true if the state is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }

    /// Returns true if the order still has broker-side work pending.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Submitted | Self::Placed | Self::Filled | Self::Active)
    }

    /// Returns true if the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Submitted, Self::Placed | Self::Failed)
                | (Self::Placed, Self::Filled | Self::Failed)
                | (Self::Filled, Self::Active | Self::Closed)
                | (Self::Active, Self::StopTriggered)
                | (Self::StopTriggered, Self::Closed)
        )
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => write!(f, "SUBMITTED"),
            Self::Placed => write!(f, "PLACED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Active => write!(f, "ACTIVE"),
            Self::StopTriggered => write!(f, "STOP_TRIGGERED"),
            Self::Closed => write!(f, "CLOSED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}
