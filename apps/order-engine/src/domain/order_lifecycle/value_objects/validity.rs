//! Order validity (time in force).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validity specifying how long an order remains working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Validity {
    /// Valid for the current trading day.
    Day,
    /// Immediate-or-cancel (fill immediately, cancel remainder).
    Ioc,
}

impl Validity {
    /// Returns true if the order requires immediate execution.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Ioc)
    }
}

impl Default for Validity {
    fn default() -> Self {
        Self::Day
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "DAY"),
            Self::Ioc => write!(f, "IOC"),
        }
    }
}
