//! Domain errors shared across bounded contexts.

use thiserror::Error;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Invalid state transition attempted.
    #[error("Invalid state transition for {entity}: {from} -> {to}")]
    InvalidStateTransition {
        /// Entity type (e.g., "OrderRecord").
        entity: String,
        /// Current state.
        from: String,
        /// Attempted state.
        to: String,
    },

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type.
        entity: String,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate identifier on insert.
    #[error("Duplicate {entity} id: {id}")]
    Duplicate {
        /// Entity type.
        entity: String,
        /// Entity identifier.
        id: String,
    },
}
