//! Error types for the Registration actor.

use crate::model::Field;
use session_actor::FrameworkError;
use thiserror::Error;

pub use crate::model::ValidationError;

/// Errors that can occur while filling in or submitting a registration.
///
/// Rule violations are not errors of the session: they live in the session's
/// error map (see [`ValidationError`]) and never block editing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    /// The registration session does not exist (never opened, or closed).
    #[error("Registration session not found: {0}")]
    NotFound(String),

    /// A text value for the terms checkbox, or a checkbox value for a text field.
    #[error("Field '{0}' does not accept that kind of value")]
    InvalidValue(Field),

    /// A registration for this session is already on its way.
    #[error("Registration already in progress")]
    SubmissionInProgress,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for RegistrationError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<RegistrationError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => RegistrationError::NotFound(id),
            Err(other) => RegistrationError::ActorCommunicationError(other.to_string()),
        }
    }
}
