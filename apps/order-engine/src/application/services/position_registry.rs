//! Position Registry
//!
//! Thread-safe working set of stop-loss monitored positions. This is the
//! only state shared between the batch submission path and the monitor
//! loop; register/deregister are serialized behind one write lock.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::shared::OrderId;
use crate::domain::stop_loss::MonitoredPosition;

/// Registry of positions currently watched by the stop-loss monitor.
#[derive(Debug, Default)]
pub struct PositionRegistry {
    positions: RwLock<HashMap<OrderId, MonitoredPosition>>,
}

impl PositionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a position for monitoring.
    ///
    /// Registering the same originating order twice is a no-op, so a
    /// position cannot be double-counted across monitor cycles.
    pub fn register(&self, position: MonitoredPosition) -> bool {
        let mut positions = self
            .positions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if positions.contains_key(position.order_id()) {
            return false;
        }
        positions.insert(position.order_id().clone(), position);
        true
    }

    /// Remove a position from monitoring.
    pub fn deregister(&self, order_id: &OrderId) -> Option<MonitoredPosition> {
        self.positions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(order_id)
    }

    /// Check whether a position is still registered.
    #[must_use]
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.positions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(order_id)
    }

    /// Snapshot the current working set for one monitor cycle.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MonitoredPosition> {
        self.positions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Number of registered positions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.positions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is being monitored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::value_objects::{Product, Validity};
    use crate::domain::shared::{InstrumentToken, Price, Quantity};
    use rust_decimal_macros::dec;

    fn make_position(order_id: &str, token: i64) -> MonitoredPosition {
        MonitoredPosition::new(
            OrderId::new(order_id),
            InstrumentToken::new(token),
            Quantity::new(5),
            Price::new(dec!(2500)),
            Product::Intraday,
            Validity::Day,
        )
    }

    #[test]
    fn registry_register_and_deregister() {
        let registry = PositionRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register(make_position("ord-1", 738_561)));
        assert_eq!(registry.active_count(), 1);
        assert!(registry.contains(&OrderId::new("ord-1")));

        let removed = registry.deregister(&OrderId::new("ord-1"));
        assert!(removed.is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_register_is_idempotent() {
        let registry = PositionRegistry::new();
        assert!(registry.register(make_position("ord-1", 738_561)));
        assert!(!registry.register(make_position("ord-1", 738_561)));
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn registry_deregister_unknown_is_none() {
        let registry = PositionRegistry::new();
        assert!(registry.deregister(&OrderId::new("ord-404")).is_none());
    }

    #[test]
    fn registry_snapshot_is_detached() {
        let registry = PositionRegistry::new();
        registry.register(make_position("ord-1", 738_561));
        registry.register(make_position("ord-2", 2885));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);

        // mutating the registry does not affect an existing snapshot
        registry.deregister(&OrderId::new("ord-1"));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(registry.active_count(), 1);
    }
}
