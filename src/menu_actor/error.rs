//! Error types for the Menu actor.

use doc_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// Negative price, blank name or a repeated item id.
    #[error("Menu validation error: {0}")]
    Validation(String),

    /// The menu actor could not be reached; nothing was written.
    #[error("Menu store error: {0}")]
    Store(String),
}

impl MenuError {
    pub fn from_framework(e: FrameworkError) -> Self {
        match e.downcast_entity::<MenuError>() {
            Ok(menu_error) => menu_error,
            Err(other) => MenuError::Store(other.to_string()),
        }
    }
}
