//! Order request value object.

use serde::{Deserialize, Serialize};

use super::{OrderType, Product, TransactionType, Validity};
use crate::domain::shared::{DomainError, InstrumentToken, Price, Quantity, Symbol};

/// A declarative order instruction, one batch row.
///
/// Immutable once submitted. The instrument may be given as a symbol, a
/// resolved token, or both; the token wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Exchange symbol, resolved through the instrument table if no token.
    #[serde(default)]
    pub symbol: Option<Symbol>,
    /// Broker instrument token. Takes precedence over the symbol.
    #[serde(default)]
    pub instrument_token: Option<InstrumentToken>,
    /// Buy or sell.
    #[serde(default)]
    pub transaction_type: TransactionType,
    /// Number of shares.
    pub quantity: Quantity,
    /// Order price; zero means "at market".
    #[serde(default)]
    pub price: Price,
    /// Market or limit.
    #[serde(default)]
    pub order_type: OrderType,
    /// Intraday or delivery.
    #[serde(default)]
    pub product: Product,
    /// Day or immediate-or-cancel.
    #[serde(default)]
    pub validity: Validity,
    /// Stop-loss threshold, meaningful only on BUY orders.
    #[serde(default)]
    pub stop_loss_price: Option<Price>,
    /// Free-form tag forwarded to the broker.
    #[serde(default)]
    pub tag: Option<String>,
}

impl OrderRequest {
    /// Create a market order for a symbol.
    #[must_use]
    pub fn market(symbol: Symbol, transaction_type: TransactionType, quantity: Quantity) -> Self {
        Self {
            symbol: Some(symbol),
            instrument_token: None,
            transaction_type,
            quantity,
            price: Price::ZERO,
            order_type: OrderType::Market,
            product: Product::default(),
            validity: Validity::default(),
            stop_loss_price: None,
            tag: None,
        }
    }

    /// Create a limit order for a symbol.
    #[must_use]
    pub fn limit(
        symbol: Symbol,
        transaction_type: TransactionType,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            price,
            order_type: OrderType::Limit,
            ..Self::market(symbol, transaction_type, quantity)
        }
    }

    /// Set the stop-loss threshold.
    #[must_use]
    pub fn with_stop_loss(mut self, stop_loss_price: Price) -> Self {
        self.stop_loss_price = Some(stop_loss_price);
        self
    }

    /// Set the instrument token directly.
    #[must_use]
    pub fn with_token(mut self, token: InstrumentToken) -> Self {
        self.instrument_token = Some(token);
        self
    }

    /// Set the broker tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set product and validity together.
    #[must_use]
    pub const fn with_terms(mut self, product: Product, validity: Validity) -> Self {
        self.product = product;
        self.validity = validity;
        self
    }

    /// Validate the request invariants.
    ///
    /// A violation means the request never reaches the broker.
    ///
    /// # Errors
    ///
    /// Returns error if quantity is not positive, a limit order has no
    /// positive price, the stop-loss is malformed or attached to a SELL,
    /// or no instrument identifier is present.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.quantity.validate_for_order()?;
        self.price.validate_for_order()?;

        if self.symbol.is_none() && self.instrument_token.is_none() {
            return Err(DomainError::InvalidValue {
                field: "instrument".to_string(),
                message: "Either a symbol or an instrument token is required".to_string(),
            });
        }

        if let Some(symbol) = &self.symbol {
            symbol.validate()?;
        }

        if self.order_type.requires_price() && !self.price.is_positive() {
            return Err(DomainError::InvalidValue {
                field: "price".to_string(),
                message: "Limit orders require a positive price".to_string(),
            });
        }

        if let Some(stop) = self.stop_loss_price {
            if !stop.is_positive() {
                return Err(DomainError::InvalidValue {
                    field: "stop_loss_price".to_string(),
                    message: "Stop-loss price must be positive".to_string(),
                });
            }
            // Long positions only; short-side stop rules are unspecified.
            if !self.transaction_type.is_buy() {
                return Err(DomainError::InvalidValue {
                    field: "stop_loss_price".to_string(),
                    message: "Stop-loss is only supported on BUY orders".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns true if a fill of this request should be stop-loss monitored.
    #[must_use]
    pub const fn wants_stop_monitoring(&self) -> bool {
        self.transaction_type.is_buy() && self.stop_loss_price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn buy_with_stop() -> OrderRequest {
        OrderRequest::market(Symbol::new("RELIANCE"), TransactionType::Buy, Quantity::new(5))
            .with_stop_loss(Price::new(dec!(2500)))
    }

    #[test]
    fn request_market_defaults() {
        let request = buy_with_stop();
        assert_eq!(request.order_type, OrderType::Market);
        assert_eq!(request.product, Product::Intraday);
        assert_eq!(request.validity, Validity::Day);
        assert!(request.price.is_zero());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_zero_quantity_rejected() {
        let request = OrderRequest::market(
            Symbol::new("RELIANCE"),
            TransactionType::Sell,
            Quantity::ZERO,
        );
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_limit_requires_positive_price() {
        let mut request = OrderRequest::limit(
            Symbol::new("TCS"),
            TransactionType::Buy,
            Quantity::new(10),
            Price::new(dec!(3550)),
        );
        assert!(request.validate().is_ok());

        request.price = Price::ZERO;
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_requires_some_instrument() {
        let mut request = buy_with_stop();
        request.symbol = None;
        assert!(request.validate().is_err());

        request.instrument_token = Some(InstrumentToken::new(738_561));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_stop_loss_must_be_positive() {
        let mut request = buy_with_stop();
        request.stop_loss_price = Some(Price::ZERO);
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_stop_loss_rejected_on_sell() {
        let request =
            OrderRequest::market(Symbol::new("RELIANCE"), TransactionType::Sell, Quantity::new(5))
                .with_stop_loss(Price::new(dec!(2500)));
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_wants_stop_monitoring() {
        assert!(buy_with_stop().wants_stop_monitoring());

        let plain =
            OrderRequest::market(Symbol::new("RELIANCE"), TransactionType::Buy, Quantity::new(5));
        assert!(!plain.wants_stop_monitoring());
    }

    #[test]
    fn request_deserializes_batch_row() {
        let json = r#"{
            "symbol": "RELIANCE",
            "transaction_type": "BUY",
            "quantity": 5,
            "stop_loss_price": 2500,
            "tag": "excel-order"
        }"#;

        let request: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.quantity, Quantity::new(5));
        assert_eq!(request.order_type, OrderType::Market);
        assert_eq!(request.stop_loss_price, Some(Price::new(dec!(2500))));
        assert_eq!(request.tag.as_deref(), Some("excel-order"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_deserializes_token_only_row() {
        let json = r#"{"instrument_token": 738561, "quantity": 1}"#;

        let request: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.instrument_token, Some(InstrumentToken::new(738_561)));
        assert_eq!(request.transaction_type, TransactionType::Buy);
        assert!(request.validate().is_ok());
    }
}
