use crate::model::OrderStatus;
use crate::table_actor::TableError;
use thiserror::Error;

/// Errors surfaced by order submission, transitions and the live feed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Blank customer name or empty cart. Nothing was written.
    #[error("Order validation error: {0}")]
    Validation(String),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The table, or the order within it, does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Order store error: {0}")]
    Store(String),
}

impl From<TableError> for OrderError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::Validation(msg) => OrderError::Validation(msg),
            TableError::NotFound(id) => OrderError::NotFound(id),
            TableError::OrderNotFound(id) => OrderError::NotFound(id.to_string()),
            TableError::InvalidTransition { from, to } => OrderError::InvalidTransition { from, to },
            TableError::Store(msg) => OrderError::Store(msg),
        }
    }
}
