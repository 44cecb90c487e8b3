//! Error types for the User actor.

use doc_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The profile update is not allowed (e.g. it would change the role).
    #[error("User validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("User store error: {0}")]
    Store(String),
}

impl UserError {
    pub fn from_framework(e: FrameworkError) -> Self {
        match e.downcast_entity::<UserError>() {
            Ok(user_error) => user_error,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(other) => UserError::Store(other.to_string()),
        }
    }
}
