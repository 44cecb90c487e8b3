use crate::restaurant_actor::RestaurantError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// Malformed sign-up input, or an email that is already registered.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Credentials exist but the identity document does not.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session store error: {0}")]
    Store(String),
}

impl From<UserError> for SessionError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(id) => SessionError::NotFound(id),
            UserError::Validation(msg) => SessionError::Validation(msg),
            UserError::Store(msg) => SessionError::Store(msg),
        }
    }
}

impl From<RestaurantError> for SessionError {
    fn from(e: RestaurantError) -> Self {
        match e {
            RestaurantError::NotFound(id) => SessionError::NotFound(id),
            RestaurantError::Store(msg) => SessionError::Store(msg),
        }
    }
}
