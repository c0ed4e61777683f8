//! Error types for the Order actor.

use session_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur while configuring or submitting an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The ordering session does not exist (never opened, or closed).
    #[error("Order session not found: {0}")]
    NotFound(String),

    /// The configuration cannot change in the session's current phase.
    #[error("Order cannot be changed while {0}")]
    Locked(&'static str),

    /// A submission for this session is already on its way.
    #[error("Order submission already in progress")]
    SubmissionInProgress,

    /// The order was placed; reset it before ordering again.
    #[error("Order already placed")]
    AlreadyPlaced,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<OrderError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_survive_the_framework() {
        let wrapped = FrameworkError::EntityError(Box::new(OrderError::AlreadyPlaced));
        assert_eq!(OrderError::from(wrapped), OrderError::AlreadyPlaced);

        let missing = FrameworkError::NotFound("order_session_4".to_string());
        assert_eq!(
            OrderError::from(missing),
            OrderError::NotFound("order_session_4".to_string())
        );

        assert_eq!(
            OrderError::from(FrameworkError::ActorClosed),
            OrderError::ActorCommunicationError("Actor closed".to_string())
        );
    }
}
