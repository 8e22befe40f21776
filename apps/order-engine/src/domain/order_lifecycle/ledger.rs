//! Order Ledger Trait
//!
//! Defines the persistence abstraction for order records.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::record::OrderRecord;
use super::value_objects::OrderState;
use crate::domain::shared::{DomainError, OrderId};

/// Mutation applied to a record under the ledger's write lock.
pub type RecordMutation<'a> = &'a mut (dyn FnMut(&mut OrderRecord) -> Result<(), DomainError> + Send);

/// Ledger of every order submitted in a run.
///
/// One entry per accepted request, never deleted, listed in insertion order.
/// Mutations to a record are serialized and swapped in whole, so concurrent
/// readers never observe a half-applied transition.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Insert a freshly created record.
    ///
    /// # Errors
    ///
    /// Returns error if a record with the same id already exists.
    async fn record(&self, record: OrderRecord) -> Result<(), DomainError>;

    /// Apply a mutation to a record and return the updated copy.
    ///
    /// The mutation runs under the write lock; if it fails, the record is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the record does not exist or the mutation fails.
    async fn update(&self, id: &OrderId, mutate: RecordMutation<'_>)
    -> Result<OrderRecord, DomainError>;

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn get(&self, id: &OrderId) -> Result<Option<OrderRecord>, DomainError>;

    /// List all records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list(&self) -> Result<Vec<OrderRecord>, DomainError>;

    /// List records in a given state, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_state(&self, state: OrderState) -> Result<Vec<OrderRecord>, DomainError>;
}
