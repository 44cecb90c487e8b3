//! Error types for the Table actor.

use crate::model::{OrderId, OrderStatus};
use doc_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// Table numbers start at 1.
    #[error("Table validation error: {0}")]
    Validation(String),

    /// The requested table was not found.
    #[error("Table not found: {0}")]
    NotFound(String),

    /// No order with this id is embedded in the table.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// `from` is the status currently stored, which may differ from what the
    /// caller last saw.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The table actor could not be reached or answered unexpectedly.
    #[error("Table store error: {0}")]
    Store(String),
}

impl TableError {
    /// Maps a framework error, recovering errors raised inside the actor.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e.downcast_entity::<TableError>() {
            Ok(table_error) => table_error,
            Err(FrameworkError::NotFound(id)) => TableError::NotFound(id),
            Err(other) => TableError::Store(other.to_string()),
        }
    }
}
