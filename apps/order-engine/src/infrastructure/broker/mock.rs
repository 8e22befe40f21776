//! Scriptable in-memory broker for tests and dry runs.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{BrokerError, BrokerOrderStatus, BrokerPort, PlaceOrder};
use crate::domain::shared::{BrokerOrderId, InstrumentToken, Price};

/// Outcome the mock returns for the next placements.
#[derive(Debug, Clone, Default)]
pub enum PlaceOutcome {
    /// Accept and assign a sequential broker order id.
    #[default]
    Accept,
    /// Reject with the given reason.
    Reject(String),
    /// Fail with a transport error (ambiguous outcome).
    Transport(String),
}

/// Mock broker.
///
/// Quotes are scripted per instrument token; order statuses default to
/// filled so market orders complete on the next status check.
#[derive(Debug, Default)]
pub struct MockBroker {
    prices: RwLock<HashMap<i64, Price>>,
    failing_quotes: RwLock<HashSet<i64>>,
    place_outcome: RwLock<PlaceOutcome>,
    placed: RwLock<Vec<PlaceOrder>>,
    statuses: RwLock<HashMap<String, BrokerOrderStatus>>,
    next_id: AtomicU64,
}

impl MockBroker {
    /// Create a new mock broker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the LTP for an instrument token.
    pub fn set_price(&self, token: InstrumentToken, price: Price) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.value(), price);
        self.failing_quotes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&token.value());
    }

    /// Make quote requests for an instrument fail.
    pub fn fail_quote(&self, token: InstrumentToken) {
        self.failing_quotes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.value());
    }

    /// Script the outcome of subsequent placements.
    pub fn set_place_outcome(&self, outcome: PlaceOutcome) {
        *self
            .place_outcome
            .write()
            .unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    /// Override the status reported for a broker order id.
    pub fn set_status(&self, broker_order_id: &BrokerOrderId, status: BrokerOrderStatus) {
        self.statuses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(broker_order_id.as_str().to_string(), status);
    }

    /// All placement payloads the mock has accepted or attempted.
    #[must_use]
    pub fn placed_orders(&self) -> Vec<PlaceOrder> {
        self.placed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of placement attempts.
    #[must_use]
    pub fn place_attempts(&self) -> usize {
        self.placed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl BrokerPort for MockBroker {
    async fn place_order(&self, order: &PlaceOrder) -> Result<BrokerOrderId, BrokerError> {
        self.placed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());

        let outcome = self
            .place_outcome
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match outcome {
            PlaceOutcome::Accept => {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(BrokerOrderId::new(format!("mock-{n}")))
            }
            PlaceOutcome::Reject(reason) => Err(BrokerError::Rejected { reason }),
            PlaceOutcome::Transport(message) => Err(BrokerError::Transport { message }),
        }
    }

    async fn order_status(
        &self,
        broker_order_id: &BrokerOrderId,
    ) -> Result<BrokerOrderStatus, BrokerError> {
        Ok(self
            .statuses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(broker_order_id.as_str())
            .cloned()
            .unwrap_or(BrokerOrderStatus::Filled {
                average_price: None,
            }))
    }

    async fn last_traded_price(&self, token: &InstrumentToken) -> Result<Price, BrokerError> {
        if self
            .failing_quotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&token.value())
        {
            return Err(BrokerError::Transport {
                message: "scripted quote failure".to_string(),
            });
        }

        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&token.value())
            .copied()
            .ok_or(BrokerError::QuoteUnavailable {
                token: token.value(),
            })
    }
}
