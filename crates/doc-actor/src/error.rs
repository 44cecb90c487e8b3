//! # Framework Errors
//!
//! Errors raised by the store plumbing itself. Entity-specific failures travel
//! inside [`FrameworkError::EntityError`] and can be recovered with
//! [`FrameworkError::downcast_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Collection has no id generator")]
    NoIdGenerator,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error raised inside an actor hook.
    ///
    /// Returns `Err(self)` unchanged when this is not an entity error of type `E`.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }

    /// True when the request never reached the actor or the actor went away
    /// before answering.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("bad number {0}")]
    struct BadNumber(u32);

    #[test]
    fn test_downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(BadNumber(0)));
        assert_eq!(err.downcast_entity::<BadNumber>().unwrap(), BadNumber(0));
    }

    #[test]
    fn test_downcast_keeps_other_errors() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = err.downcast_entity::<BadNumber>().unwrap_err();
        assert!(back.to_string().contains("disk"));

        let closed = FrameworkError::ActorClosed.downcast_entity::<BadNumber>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }

    #[test]
    fn test_unavailable() {
        assert!(FrameworkError::ActorClosed.is_unavailable());
        assert!(FrameworkError::ActorDropped.is_unavailable());
        assert!(!FrameworkError::NotFound("x".into()).is_unavailable());
    }
}
