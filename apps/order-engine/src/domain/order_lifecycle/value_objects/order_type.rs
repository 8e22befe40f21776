//! Order type (market or limit).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pricing mode of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Execute at the prevailing market price.
    Market,
    /// Execute at the given price or better.
    Limit,
}

impl OrderType {
    /// Returns true if the order type requires a positive price.
    #[must_use]
    pub const fn requires_price(&self) -> bool {
        matches!(self, Self::Limit)
    }
}

impl Default for OrderType {
    fn default() -> Self {
        Self::Market
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_type_requires_price() {
        assert!(!OrderType::Market.requires_price());
        assert!(OrderType::Limit.requires_price());
    }

    #[test]
    fn order_type_default() {
        assert_eq!(OrderType::default(), OrderType::Market);
    }

    #[test]
    fn order_type_display() {
        assert_eq!(format!("{}", OrderType::Market), "MARKET");
        assert_eq!(format!("{}", OrderType::Limit), "LIMIT");
    }

    #[test]
    fn order_type_serde() {
        let parsed: OrderType = serde_json::from_str("\"LIMIT\"").unwrap();
        assert_eq!(parsed, OrderType::Limit);
    }
}
