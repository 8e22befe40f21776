//! Upstox broker adapter implementing `BrokerPort`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::application::ports::{BrokerError, BrokerOrderStatus, BrokerPort, PlaceOrder};
use crate::domain::shared::{BrokerOrderId, InstrumentToken, Price};

use super::api_types::{
    UpstoxLtpData, UpstoxOrderData, UpstoxOrderDetails, UpstoxOrderRequest, UpstoxResponse,
};
use super::config::UpstoxConfig;
use super::error::UpstoxError;
use super::http_client::UpstoxHttpClient;

/// Upstox v2 broker adapter.
///
/// Implements `BrokerPort` against the Upstox REST API.
#[derive(Debug, Clone)]
pub struct UpstoxBrokerAdapter {
    client: UpstoxHttpClient,
}

impl UpstoxBrokerAdapter {
    /// Create a new Upstox broker adapter.
    ///
    /// # Errors
    ///
    /// Returns error if the access token is missing or the HTTP client
    /// cannot be built.
    pub fn new(config: &UpstoxConfig) -> Result<Self, UpstoxError> {
        let client = UpstoxHttpClient::new(config)?;
        Ok(Self { client })
    }

    /// Convert the placement payload to Upstox wire format.
    fn to_wire(order: &PlaceOrder) -> UpstoxOrderRequest {
        UpstoxOrderRequest {
            quantity: order.quantity.value(),
            product: order.product.wire_code().to_string(),
            validity: order.validity.to_string(),
            price: order.price.amount(),
            tag: order.tag.clone(),
            instrument_token: order.instrument_token.value(),
            order_type: order.order_type.to_string(),
            transaction_type: order.transaction_type.to_string(),
            disclosed_quantity: 0,
            trigger_price: Decimal::ZERO,
            is_amo: false,
        }
    }

    /// Map an Upstox order status string to the port's status.
    fn map_status(details: &UpstoxOrderDetails) -> BrokerOrderStatus {
        match details.status.as_str() {
            "complete" => BrokerOrderStatus::Filled {
                average_price: details.average_price.map(Price::new),
            },
            "rejected" => BrokerOrderStatus::Rejected {
                reason: details
                    .status_message
                    .clone()
                    .unwrap_or_else(|| "rejected by broker".to_string()),
            },
            "cancelled" | "canceled" => BrokerOrderStatus::Cancelled,
            _ => BrokerOrderStatus::Open,
        }
    }
}

#[async_trait]
impl BrokerPort for UpstoxBrokerAdapter {
    async fn place_order(&self, order: &PlaceOrder) -> Result<BrokerOrderId, BrokerError> {
        let wire = Self::to_wire(order);

        tracing::info!(
            instrument_token = wire.instrument_token,
            transaction_type = %wire.transaction_type,
            order_type = %wire.order_type,
            quantity = wire.quantity,
            price = %wire.price,
            "placing order with Upstox"
        );

        let response: UpstoxResponse<UpstoxOrderData> = self
            .client
            .post("/v2/order/place", &wire)
            .await
            .map_err(BrokerError::from)?;

        if !response.is_success() {
            return Err(BrokerError::Rejected {
                reason: response.error_message(),
            });
        }

        let Some(data) = response.data else {
            return Err(BrokerError::Rejected {
                reason: "success response without order id".to_string(),
            });
        };

        tracing::info!(broker_order_id = %data.order_id, "order accepted by Upstox");
        Ok(BrokerOrderId::new(data.order_id))
    }

    async fn order_status(
        &self,
        broker_order_id: &BrokerOrderId,
    ) -> Result<BrokerOrderStatus, BrokerError> {
        let path = format!("/v2/order/details?order_id={}", broker_order_id.as_str());
        let response: UpstoxResponse<UpstoxOrderDetails> =
            self.client.get(&path).await.map_err(BrokerError::from)?;

        if !response.is_success() {
            return Err(BrokerError::Transport {
                message: response.error_message(),
            });
        }

        let Some(details) = response.data else {
            return Err(BrokerError::Transport {
                message: "success response without order details".to_string(),
            });
        };

        Ok(Self::map_status(&details))
    }

    async fn last_traded_price(&self, token: &InstrumentToken) -> Result<Price, BrokerError> {
        let path = format!("/v2/market-quote/ltp?instrument_token={token}");
        let response: UpstoxResponse<UpstoxLtpData> =
            self.client.get(&path).await.map_err(BrokerError::from)?;

        let last_price = response
            .data
            .and_then(|data| data.get(&token.value().to_string()).cloned())
            .and_then(|entry| entry.last_price);

        last_price.map(Price::new).ok_or(BrokerError::QuoteUnavailable {
            token: token.value(),
        })
    }
}
