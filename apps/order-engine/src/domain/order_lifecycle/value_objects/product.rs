//! Product type (intraday or delivery).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement product for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Product {
    /// Intraday position, squared off the same trading day.
    Intraday,
    /// Delivery position, settled into the demat account.
    Delivery,
}

impl Product {
    /// Single-letter code used on the broker wire ("I" / "D").
    #[must_use]
    pub const fn wire_code(&self) -> &'static str {
        match self {
            Self::Intraday => "I",
            Self::Delivery => "D",
        }
    }
}

impl Default for Product {
    fn default() -> Self {
        Self::Intraday
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intraday => write!(f, "INTRADAY"),
            Self::Delivery => write!(f, "DELIVERY"),
        }
    }
}
