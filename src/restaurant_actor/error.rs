use doc_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RestaurantError {
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    #[error("Restaurant store error: {0}")]
    Store(String),
}

impl RestaurantError {
    pub fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => RestaurantError::NotFound(id),
            other => RestaurantError::Store(other.to_string()),
        }
    }
}
