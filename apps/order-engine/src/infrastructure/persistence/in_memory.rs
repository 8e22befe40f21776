//! In-memory order ledger.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::order_lifecycle::ledger::{OrderLedger, RecordMutation};
use crate::domain::order_lifecycle::record::OrderRecord;
use crate::domain::order_lifecycle::value_objects::OrderState;
use crate::domain::shared::{DomainError, OrderId};

/// In-memory implementation of `OrderLedger`.
///
/// Records are swapped whole under the write lock, so readers never see a
/// half-applied transition. Insertion order is kept for `list`.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, OrderRecord>,
    insertion_order: Vec<OrderId>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of records in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    /// Check if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderLedger for InMemoryLedger {
    async fn record(&self, record: OrderRecord) -> Result<(), DomainError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let key = record.id().as_str().to_string();
        if inner.records.contains_key(&key) {
            return Err(DomainError::Duplicate {
                entity: "OrderRecord".to_string(),
                id: key,
            });
        }
        inner.insertion_order.push(record.id().clone());
        inner.records.insert(key, record);
        Ok(())
    }

    async fn update(
        &self,
        id: &OrderId,
        mutate: RecordMutation<'_>,
    ) -> Result<OrderRecord, DomainError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let record = inner
            .records
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::NotFound {
                entity: "OrderRecord".to_string(),
                id: id.as_str().to_string(),
            })?;

        // Mutate a working copy first; a failed transition leaves the
        // stored record untouched.
        let mut working = record.clone();
        mutate(&mut working)?;
        *record = working.clone();
        Ok(working)
    }

    async fn get(&self, id: &OrderId) -> Result<Option<OrderRecord>, DomainError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.records.get(id.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<OrderRecord>, DomainError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .insertion_order
            .iter()
            .filter_map(|id| inner.records.get(id.as_str()).cloned())
            .collect())
    }

    async fn find_by_state(&self, state: OrderState) -> Result<Vec<OrderRecord>, DomainError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .insertion_order
            .iter()
            .filter_map(|id| inner.records.get(id.as_str()))
            .filter(|r| r.state() == state)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::value_objects::{OrderRequest, TransactionType};
    use crate::domain::shared::{BrokerOrderId, InstrumentToken, Quantity, Symbol};

    fn make_record(symbol: &str) -> OrderRecord {
        let request = OrderRequest::market(
            Symbol::new(symbol),
            TransactionType::Buy,
            Quantity::new(1),
        );
        OrderRecord::new(request, InstrumentToken::new(1))
    }

    #[tokio::test]
    async fn ledger_record_and_get() {
        let ledger = InMemoryLedger::new();
        let record = make_record("RELIANCE");
        let id = record.id().clone();

        ledger.record(record).await.unwrap();

        let found = ledger.get(&id).await.unwrap().unwrap();
        assert_eq!(found.id(), &id);
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn ledger_rejects_duplicate_ids() {
        let ledger = InMemoryLedger::new();
        let record = make_record("RELIANCE");

        ledger.record(record.clone()).await.unwrap();
        let result = ledger.record(record).await;

        assert!(matches!(result, Err(DomainError::Duplicate { .. })));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn ledger_list_preserves_insertion_order() {
        let ledger = InMemoryLedger::new();
        let first = make_record("RELIANCE");
        let second = make_record("TCS");
        let first_id = first.id().clone();
        let second_id = second.id().clone();

        ledger.record(first).await.unwrap();
        ledger.record(second).await.unwrap();

        let listed = ledger.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), &first_id);
        assert_eq!(listed[1].id(), &second_id);
    }

    #[tokio::test]
    async fn ledger_update_applies_mutation() {
        let ledger = InMemoryLedger::new();
        let record = make_record("RELIANCE");
        let id = record.id().clone();
        ledger.record(record).await.unwrap();

        let updated = ledger
            .update(&id, &mut |r| r.placed(BrokerOrderId::new("bo-1")))
            .await
            .unwrap();

        assert_eq!(updated.state(), OrderState::Placed);
        let stored = ledger.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.state(), OrderState::Placed);
    }

    #[tokio::test]
    async fn ledger_update_failure_leaves_record_untouched() {
        let ledger = InMemoryLedger::new();
        let record = make_record("RELIANCE");
        let id = record.id().clone();
        ledger.record(record).await.unwrap();

        // Illegal transition: SUBMITTED -> FILLED
        let result = ledger.update(&id, &mut |r| r.filled()).await;
        assert!(result.is_err());

        let stored = ledger.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.state(), OrderState::Submitted);
        assert_eq!(stored.history().len(), 1);
    }

    #[tokio::test]
    async fn ledger_update_unknown_id_is_not_found() {
        let ledger = InMemoryLedger::new();
        let result = ledger
            .update(&OrderId::new("ord-404"), &mut |_| Ok(()))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn ledger_find_by_state() {
        let ledger = InMemoryLedger::new();
        let placed = make_record("RELIANCE");
        let placed_id = placed.id().clone();
        let submitted = make_record("TCS");

        ledger.record(placed).await.unwrap();
        ledger.record(submitted).await.unwrap();
        ledger
            .update(&placed_id, &mut |r| r.placed(BrokerOrderId::new("bo-1")))
            .await
            .unwrap();

        let found = ledger.find_by_state(OrderState::Placed).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), &placed_id);

        let submitted_found = ledger.find_by_state(OrderState::Submitted).await.unwrap();
        assert_eq!(submitted_found.len(), 1);
    }
}
