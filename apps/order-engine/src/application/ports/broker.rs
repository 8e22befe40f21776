//! Broker Port (Driven Port)
//!
//! Interface for interacting with the brokerage for order placement,
//! status reconciliation, and market quotes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::value_objects::{
    OrderRequest, OrderType, Product, TransactionType, Validity,
};
use crate::domain::shared::{BrokerOrderId, InstrumentToken, Price, Quantity};

/// Fully resolved placement payload handed to the broker adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    /// Instrument token.
    pub instrument_token: InstrumentToken,
    /// Buy or sell.
    pub transaction_type: TransactionType,
    /// Number of shares.
    pub quantity: Quantity,
    /// Order price; zero for market orders.
    pub price: Price,
    /// Market or limit.
    pub order_type: OrderType,
    /// Intraday or delivery.
    pub product: Product,
    /// Day or immediate-or-cancel.
    pub validity: Validity,
    /// Free-form tag forwarded to the broker.
    pub tag: Option<String>,
}

impl PlaceOrder {
    /// Build the placement payload from a validated request and its
    /// resolved instrument token.
    #[must_use]
    pub fn from_request(request: &OrderRequest, instrument_token: InstrumentToken) -> Self {
        Self {
            instrument_token,
            transaction_type: request.transaction_type,
            quantity: request.quantity,
            price: request.price,
            order_type: request.order_type,
            product: request.product,
            validity: request.validity,
            tag: request.tag.clone(),
        }
    }
}

/// Broker-reported status of a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerOrderStatus {
    /// Order is working at the exchange.
    Open,
    /// Order completely filled.
    Filled {
        /// Average fill price, when the broker reports one.
        average_price: Option<Price>,
    },
    /// Order rejected after placement.
    Rejected {
        /// Broker's rejection reason.
        reason: String,
    },
    /// Order cancelled at the exchange.
    Cancelled,
}

/// Broker port error.
///
/// `Rejected` is terminal for the order; `Transport` means the outcome is
/// unknown and the caller must reconcile via a status check before anything
/// is retried. Placements are never re-issued automatically.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    /// Broker explicitly refused the order.
    #[error("order rejected by broker: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
    },

    /// Network or timeout failure; the outcome of the call is unknown.
    #[error("broker transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// The broker returned no quote for the instrument.
    #[error("quote unavailable for instrument token {token}")]
    QuoteUnavailable {
        /// The instrument token that had no quote.
        token: i64,
    },
}

/// Port for broker interactions.
#[async_trait]
pub trait BrokerPort: Send + Sync {
    /// Place an order. Called exactly once per accepted request.
    async fn place_order(&self, order: &PlaceOrder) -> Result<BrokerOrderId, BrokerError>;

    /// Fetch the broker-side status of a placed order.
    async fn order_status(
        &self,
        broker_order_id: &BrokerOrderId,
    ) -> Result<BrokerOrderStatus, BrokerError>;

    /// Fetch the last traded price for an instrument.
    async fn last_traded_price(&self, token: &InstrumentToken) -> Result<Price, BrokerError>;
}
