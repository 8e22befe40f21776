//! Transaction type (buy or sell).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl TransactionType {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns true for buy orders.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        Self::Buy
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_opposite() {
        assert_eq!(TransactionType::Buy.opposite(), TransactionType::Sell);
        assert_eq!(TransactionType::Sell.opposite(), TransactionType::Buy);
    }

    #[test]
    fn transaction_type_is_buy() {
        assert!(TransactionType::Buy.is_buy());
        assert!(!TransactionType::Sell.is_buy());
    }

    #[test]
    fn transaction_type_display() {
        assert_eq!(format!("{}", TransactionType::Buy), "BUY");
        assert_eq!(format!("{}", TransactionType::Sell), "SELL");
    }

    #[test]
    fn transaction_type_serde() {
        let json = serde_json::to_string(&TransactionType::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");

        let parsed: TransactionType = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(parsed, TransactionType::Sell);
    }
}
