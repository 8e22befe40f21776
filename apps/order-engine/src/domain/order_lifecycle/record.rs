//! Order Record Aggregate Root
//!
//! An `OrderRecord` tracks one accepted request through its whole lifecycle.
//! Every transition is appended to the record's history; history entries are
//! never rewritten or removed.

use serde::{Deserialize, Serialize};

use super::value_objects::{OrderRequest, OrderState};
use crate::domain::shared::{BrokerOrderId, DomainError, InstrumentToken, OrderId, Price, Timestamp};

/// One entry in an order's event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// State of the record after this entry.
    pub state: OrderState,
    /// Optional human-readable reason (broker rejection text, trigger LTP).
    pub reason: Option<String>,
    /// When the entry was appended.
    pub at: Timestamp,
}

/// Order Record Aggregate Root.
///
/// Created by the execution engine when a request is accepted for
/// submission; owned by the order ledger thereafter. The aggregate enforces
/// the forward-only state machine; callers cannot move a record backward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    id: OrderId,
    request: OrderRequest,
    instrument: InstrumentToken,
    broker_order_id: Option<BrokerOrderId>,
    state: OrderState,
    history: Vec<StateChange>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl OrderRecord {
    /// Create a new record in SUBMITTED state.
    #[must_use]
    pub fn new(request: OrderRequest, instrument: InstrumentToken) -> Self {
        let now = Timestamp::now();
        Self {
            id: OrderId::generate(),
            request,
            instrument,
            broker_order_id: None,
            state: OrderState::Submitted,
            history: vec![StateChange {
                state: OrderState::Submitted,
                reason: None,
                at: now,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the engine-internal order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the originating request.
    #[must_use]
    pub const fn request(&self) -> &OrderRequest {
        &self.request
    }

    /// Get the resolved instrument token.
    #[must_use]
    pub const fn instrument(&self) -> InstrumentToken {
        self.instrument
    }

    /// Get the broker-assigned order ID, present once placement succeeds.
    #[must_use]
    pub const fn broker_order_id(&self) -> Option<&BrokerOrderId> {
        self.broker_order_id.as_ref()
    }

    /// Get the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> OrderState {
        self.state
    }

    /// Get the event history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[StateChange] {
        &self.history
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true if a fill of this record should be stop-loss monitored.
    #[must_use]
    pub const fn wants_stop_monitoring(&self) -> bool {
        self.request.wants_stop_monitoring()
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Broker acknowledged placement.
    ///
    /// # Errors
    ///
    /// Returns error unless the record is SUBMITTED.
    pub fn placed(&mut self, broker_order_id: BrokerOrderId) -> Result<(), DomainError> {
        self.transition(
            OrderState::Placed,
            Some(format!("broker order id {broker_order_id}")),
        )?;
        self.broker_order_id = Some(broker_order_id);
        Ok(())
    }

    /// Broker rejected the order.
    ///
    /// # Errors
    ///
    /// Returns error unless the record is SUBMITTED or PLACED.
    pub fn failed(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.transition(OrderState::Failed, Some(reason.into()))
    }

    /// Broker reported the order completely filled.
    ///
    /// # Errors
    ///
    /// Returns error unless the record is PLACED.
    pub fn filled(&mut self) -> Result<(), DomainError> {
        self.transition(OrderState::Filled, None)
    }

    /// Stop-loss monitoring started for this fill.
    ///
    /// # Errors
    ///
    /// Returns error unless the record is FILLED.
    pub fn activated(&mut self) -> Result<(), DomainError> {
        self.transition(OrderState::Active, None)
    }

    /// Stop-loss breached and the exit SELL was placed.
    ///
    /// # Errors
    ///
    /// Returns error unless the record is ACTIVE.
    pub fn stop_triggered(&mut self, ltp: Price) -> Result<(), DomainError> {
        self.transition(
            OrderState::StopTriggered,
            Some(format!("LTP {ltp} breached stop-loss")),
        )
    }

    /// Lifecycle complete.
    ///
    /// # Errors
    ///
    /// Returns error unless the record is FILLED or STOP_TRIGGERED.
    pub fn closed(&mut self) -> Result<(), DomainError> {
        self.transition(OrderState::Closed, None)
    }

    /// Append a note to the history without changing state.
    ///
    /// Used when a placement outcome is ambiguous: the record keeps its last
    /// confirmed state, but the history shows what happened.
    pub fn annotate(&mut self, note: impl Into<String>) {
        self.updated_at = Timestamp::now();
        self.history.push(StateChange {
            state: self.state,
            reason: Some(note.into()),
            at: self.updated_at,
        });
    }

    fn transition(&mut self, to: OrderState, reason: Option<String>) -> Result<(), DomainError> {
        if !self.state.can_transition_to(to) {
            return Err(DomainError::InvalidStateTransition {
                entity: "OrderRecord".to_string(),
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }

        self.state = to;
        self.updated_at = Timestamp::now();
        self.history.push(StateChange {
            state: to,
            reason,
            at: self.updated_at,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::value_objects::TransactionType;
    use crate::domain::shared::{Quantity, Symbol};
    use rust_decimal_macros::dec;

    fn make_record() -> OrderRecord {
        let request = OrderRequest::market(
            Symbol::new("RELIANCE"),
            TransactionType::Buy,
            Quantity::new(5),
        )
        .with_stop_loss(Price::new(dec!(2500)));
        OrderRecord::new(request, InstrumentToken::new(738_561))
    }

    #[test]
    fn record_starts_submitted_with_one_history_entry() {
        let record = make_record();
        assert_eq!(record.state(), OrderState::Submitted);
        assert_eq!(record.history().len(), 1);
        assert_eq!(record.history()[0].state, OrderState::Submitted);
        assert!(record.broker_order_id().is_none());
    }

    #[test]
    fn record_placed_sets_broker_id() {
        let mut record = make_record();
        record.placed(BrokerOrderId::new("bo-1")).unwrap();

        assert_eq!(record.state(), OrderState::Placed);
        assert_eq!(record.broker_order_id().unwrap().as_str(), "bo-1");
        assert_eq!(record.history().len(), 2);
    }

    #[test]
    fn record_full_stop_loss_lifecycle() {
        let mut record = make_record();
        record.placed(BrokerOrderId::new("bo-1")).unwrap();
        record.filled().unwrap();
        record.activated().unwrap();
        record.stop_triggered(Price::new(dec!(2499.5))).unwrap();
        record.closed().unwrap();

        assert_eq!(record.state(), OrderState::Closed);
        let states: Vec<_> = record.history().iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![
                OrderState::Submitted,
                OrderState::Placed,
                OrderState::Filled,
                OrderState::Active,
                OrderState::StopTriggered,
                OrderState::Closed,
            ]
        );
    }

    #[test]
    fn record_stop_trigger_reason_carries_ltp() {
        let mut record = make_record();
        record.placed(BrokerOrderId::new("bo-1")).unwrap();
        record.filled().unwrap();
        record.activated().unwrap();
        record.stop_triggered(Price::new(dec!(2499.5))).unwrap();

        let last = record.history().last().unwrap();
        assert!(last.reason.as_deref().unwrap().contains("2499.5"));
    }

    #[test]
    fn record_failed_from_submitted() {
        let mut record = make_record();
        record.failed("insufficient funds").unwrap();

        assert_eq!(record.state(), OrderState::Failed);
        let last = record.history().last().unwrap();
        assert_eq!(last.reason.as_deref(), Some("insufficient funds"));
    }

    #[test]
    fn record_failed_from_placed() {
        let mut record = make_record();
        record.placed(BrokerOrderId::new("bo-1")).unwrap();
        record.failed("rejected at exchange").unwrap();
        assert_eq!(record.state(), OrderState::Failed);
    }

    #[test]
    fn record_rejects_backward_transition() {
        let mut record = make_record();
        record.placed(BrokerOrderId::new("bo-1")).unwrap();
        record.filled().unwrap();

        let result = record.failed("too late");
        assert!(matches!(
            result,
            Err(DomainError::InvalidStateTransition { .. })
        ));
        assert_eq!(record.state(), OrderState::Filled);
    }

    #[test]
    fn record_rejects_skipping_states() {
        let mut record = make_record();
        assert!(record.filled().is_err());
        assert!(record.closed().is_err());
        assert_eq!(record.state(), OrderState::Submitted);
    }

    #[test]
    fn record_annotate_keeps_state() {
        let mut record = make_record();
        record.annotate("placement outcome unknown: timeout");

        assert_eq!(record.state(), OrderState::Submitted);
        assert_eq!(record.history().len(), 2);
        assert_eq!(record.history()[1].state, OrderState::Submitted);
    }

    #[test]
    fn record_without_stop_closes_after_fill() {
        let request = OrderRequest::market(
            Symbol::new("TCS"),
            TransactionType::Sell,
            Quantity::new(2),
        );
        let mut record = OrderRecord::new(request, InstrumentToken::new(2885));
        record.placed(BrokerOrderId::new("bo-2")).unwrap();
        record.filled().unwrap();
        record.closed().unwrap();

        assert_eq!(record.state(), OrderState::Closed);
        assert!(!record.wants_stop_monitoring());
    }

    #[test]
    fn record_serde_roundtrip() {
        let mut record = make_record();
        record.placed(BrokerOrderId::new("bo-1")).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let parsed: OrderRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id(), record.id());
        assert_eq!(parsed.state(), record.state());
        assert_eq!(parsed.history().len(), record.history().len());
    }
}
