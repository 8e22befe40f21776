//! Upstox API request and response types.
//!
//! These types map directly to the Upstox v2 REST API format.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Request Types
// ============================================================================

/// Order placement request body for `POST /v2/order/place`.
#[derive(Debug, Clone, Serialize)]
pub struct UpstoxOrderRequest {
    /// Number of shares.
    pub quantity: u32,
    /// Product code ("I" intraday, "D" delivery).
    pub product: String,
    /// Validity ("DAY" or "IOC").
    pub validity: String,
    /// Order price; 0 for market orders.
    pub price: Decimal,
    /// Free-form order tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Instrument token.
    pub instrument_token: i64,
    /// Order type ("MARKET" or "LIMIT").
    pub order_type: String,
    /// Transaction type ("BUY" or "SELL").
    pub transaction_type: String,
    /// Disclosed quantity; always 0 here.
    pub disclosed_quantity: u32,
    /// Trigger price; always 0 here (triggers are enforced engine-side).
    pub trigger_price: Decimal,
    /// After-market-order flag; always false here.
    pub is_amo: bool,
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Generic Upstox response envelope: `{"status": "...", "data": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstoxResponse<T> {
    /// "success" or "error".
    pub status: String,
    /// Payload, absent on errors.
    #[serde(default)]
    pub data: Option<T>,
    /// Top-level message, present on some errors.
    #[serde(default)]
    pub message: Option<String>,
    /// Structured error list, present on v2 errors.
    #[serde(default)]
    pub errors: Option<Vec<UpstoxApiError>>,
}

impl<T> UpstoxResponse<T> {
    /// Returns true for a "success" envelope.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Best-effort error message out of the envelope.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Some(errors) = &self.errors
            && let Some(first) = errors.first()
            && let Some(message) = &first.message
        {
            return message.clone();
        }
        self.message
            .clone()
            .unwrap_or_else(|| "unknown broker error".to_string())
    }
}

/// One entry of the `errors` array in an error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstoxApiError {
    /// Machine-readable error code.
    #[serde(default, rename = "errorCode")]
    pub error_code: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Order Response Types
// ============================================================================

/// Payload of a successful order placement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstoxOrderData {
    /// Broker-assigned order id.
    pub order_id: String,
}

/// Payload of `GET /v2/order/details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstoxOrderDetails {
    /// Broker-assigned order id.
    pub order_id: String,
    /// Broker-side status string ("open", "complete", "rejected", ...).
    pub status: String,
    /// Average fill price, when filled.
    #[serde(default)]
    pub average_price: Option<Decimal>,
    /// Broker status message, e.g. a rejection reason.
    #[serde(default)]
    pub status_message: Option<String>,
}

// ============================================================================
// Quote Types
// ============================================================================

/// Payload of `GET /v2/market-quote/ltp`, keyed by instrument token.
pub type UpstoxLtpData = HashMap<String, UpstoxLtpEntry>;

/// One instrument's entry in an LTP response.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstoxLtpEntry {
    /// Last traded price.
    #[serde(default)]
    pub last_price: Option<Decimal>,
}
