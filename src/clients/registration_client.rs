//! # Registration Client
//!
//! Provides a high‑level API for interacting with the Registration actor.
//! Field values are never recorded on tracing spans: a text value may be a
//! password.
use crate::model::{Field, Gender};
use crate::registration_actor::{
    FieldValue, RegistrationAction, RegistrationActionResult, RegistrationError, RegistrationId,
    RegistrationSession, Submission,
};
use async_trait::async_trait;
use session_actor::{ActorClient, SessionClient};
use tracing::{debug, instrument};

/// Client for interacting with the Registration actor.
#[derive(Clone, Debug)]
pub struct RegistrationClient {
    inner: SessionClient<RegistrationSession>,
}

impl RegistrationClient {
    pub fn new(inner: SessionClient<RegistrationSession>) -> Self {
        Self { inner }
    }

    /// Opens an empty registration form.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<RegistrationId, RegistrationError> {
        debug!("Sending request");
        Ok(self.inner.open(()).await?)
    }

    /// The current state of a registration form.
    #[instrument(skip(self))]
    pub async fn get(&self, id: RegistrationId) -> Result<RegistrationSession, RegistrationError> {
        self.snapshot(id)
            .await?
            .ok_or_else(|| RegistrationError::NotFound(id.to_string()))
    }

    /// Stores a field value and returns whether the whole form is now valid.
    #[instrument(skip(self, value))]
    pub async fn set_field(
        &self,
        id: RegistrationId,
        field: Field,
        value: FieldValue,
    ) -> Result<bool, RegistrationError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, RegistrationAction::SetField { field, value })
            .await?
        {
            RegistrationActionResult::Updated { valid } => Ok(valid),
            other => Err(unexpected(other)),
        }
    }

    pub async fn set_text(
        &self,
        id: RegistrationId,
        field: Field,
        value: impl Into<String>,
    ) -> Result<bool, RegistrationError> {
        self.set_field(id, field, FieldValue::Text(value.into()))
            .await
    }

    pub async fn set_gender(
        &self,
        id: RegistrationId,
        gender: Option<Gender>,
    ) -> Result<bool, RegistrationError> {
        let text = gender.map(Gender::as_str).unwrap_or_default();
        self.set_text(id, Field::Gender, text).await
    }

    pub async fn set_terms(&self, id: RegistrationId, accepted: bool) -> Result<bool, RegistrationError> {
        self.set_field(id, Field::Terms, FieldValue::Checked(accepted))
            .await
    }

    /// Records that the user left `field`, so its error may be displayed.
    #[instrument(skip(self))]
    pub async fn mark_touched(&self, id: RegistrationId, field: Field) -> Result<(), RegistrationError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, RegistrationAction::MarkTouched(field))
            .await?
        {
            RegistrationActionResult::Touched => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Validates and, if valid, starts the registration.
    ///
    /// Use [`ActorClient::settled`] to wait for the service's answer.
    #[instrument(skip(self))]
    pub async fn submit(&self, id: RegistrationId) -> Result<Submission, RegistrationError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, RegistrationAction::Submit)
            .await?
        {
            RegistrationActionResult::Submit(submission) => Ok(submission),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(reply: RegistrationActionResult) -> RegistrationError {
    RegistrationError::ActorCommunicationError(format!("Unexpected reply: {reply:?}"))
}

#[async_trait]
impl ActorClient<RegistrationSession> for RegistrationClient {
    type Error = RegistrationError;

    fn inner(&self) -> &SessionClient<RegistrationSession> {
        &self.inner
    }
}
