//! Monitored Position Value Object

use crate::domain::order_lifecycle::OrderRecord;
use crate::domain::order_lifecycle::value_objects::{
    OrderRequest, OrderType, Product, TransactionType, Validity,
};
use crate::domain::shared::{InstrumentToken, OrderId, Price, Quantity};

/// Tag attached to synthesized stop-loss exit orders.
pub const STOP_LOSS_TAG: &str = "stop-loss-order";

/// An open long position being watched for a stop-loss breach.
///
/// Carries everything needed to synthesize the exit SELL, so a trigger does
/// not have to read the ledger first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredPosition {
    /// Originating BUY order (non-owning back-reference).
    order_id: OrderId,
    /// Instrument being watched.
    instrument: InstrumentToken,
    /// Position size, inherited by the exit SELL.
    quantity: Quantity,
    /// Liquidate when LTP falls to or below this price.
    stop_loss_price: Price,
    /// Product inherited by the exit SELL.
    product: Product,
    /// Validity inherited by the exit SELL.
    validity: Validity,
}

impl MonitoredPosition {
    /// Create a monitored position.
    #[must_use]
    pub const fn new(
        order_id: OrderId,
        instrument: InstrumentToken,
        quantity: Quantity,
        stop_loss_price: Price,
        product: Product,
        validity: Validity,
    ) -> Self {
        Self {
            order_id,
            instrument,
            quantity,
            stop_loss_price,
            product,
            validity,
        }
    }

    /// Derive a position from a filled BUY record carrying a stop-loss.
    ///
    /// Returns `None` for SELLs and for records without a stop threshold.
    #[must_use]
    pub fn from_record(record: &OrderRecord) -> Option<Self> {
        let request = record.request();
        let stop_loss_price = request.stop_loss_price?;
        if !request.transaction_type.is_buy() {
            return None;
        }
        Some(Self::new(
            record.id().clone(),
            record.instrument(),
            request.quantity,
            stop_loss_price,
            request.product,
            request.validity,
        ))
    }

    /// Get the originating order id.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Get the instrument token.
    #[must_use]
    pub const fn instrument(&self) -> InstrumentToken {
        self.instrument
    }

    /// Get the position quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the stop-loss threshold.
    #[must_use]
    pub const fn stop_loss_price(&self) -> Price {
        self.stop_loss_price
    }

    /// Synthesize the market SELL that liquidates this position.
    #[must_use]
    pub fn exit_request(&self) -> OrderRequest {
        OrderRequest {
            symbol: None,
            instrument_token: Some(self.instrument),
            transaction_type: TransactionType::Sell,
            quantity: self.quantity,
            price: Price::ZERO,
            order_type: OrderType::Market,
            product: self.product,
            validity: self.validity,
            stop_loss_price: None,
            tag: Some(STOP_LOSS_TAG.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Symbol;
    use rust_decimal_macros::dec;

    fn make_position() -> MonitoredPosition {
        MonitoredPosition::new(
            OrderId::new("ord-1"),
            InstrumentToken::new(738_561),
            Quantity::new(5),
            Price::new(dec!(2500)),
            Product::Delivery,
            Validity::Day,
        )
    }

    #[test]
    fn position_getters() {
        let position = make_position();
        assert_eq!(position.order_id().as_str(), "ord-1");
        assert_eq!(position.instrument(), InstrumentToken::new(738_561));
        assert_eq!(position.quantity(), Quantity::new(5));
        assert_eq!(position.stop_loss_price(), Price::new(dec!(2500)));
    }

    #[test]
    fn exit_request_is_market_sell_with_inherited_terms() {
        let exit = make_position().exit_request();

        assert_eq!(exit.transaction_type, TransactionType::Sell);
        assert_eq!(exit.order_type, OrderType::Market);
        assert!(exit.price.is_zero());
        assert_eq!(exit.quantity, Quantity::new(5));
        assert_eq!(exit.instrument_token, Some(InstrumentToken::new(738_561)));
        assert_eq!(exit.product, Product::Delivery);
        assert_eq!(exit.validity, Validity::Day);
        assert_eq!(exit.tag.as_deref(), Some(STOP_LOSS_TAG));
        assert!(exit.stop_loss_price.is_none());
        assert!(exit.validate().is_ok());
    }

    #[test]
    fn from_record_requires_buy_with_stop() {
        let with_stop = OrderRequest::market(
            Symbol::new("RELIANCE"),
            TransactionType::Buy,
            Quantity::new(5),
        )
        .with_stop_loss(Price::new(dec!(2500)));
        let record = OrderRecord::new(with_stop, InstrumentToken::new(738_561));
        let position = MonitoredPosition::from_record(&record).unwrap();
        assert_eq!(position.order_id(), record.id());
        assert_eq!(position.stop_loss_price(), Price::new(dec!(2500)));

        let without_stop = OrderRequest::market(
            Symbol::new("RELIANCE"),
            TransactionType::Buy,
            Quantity::new(5),
        );
        let record = OrderRecord::new(without_stop, InstrumentToken::new(738_561));
        assert!(MonitoredPosition::from_record(&record).is_none());
    }
}
