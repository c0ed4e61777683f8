//! SessionEntity implementation for a registration attempt.
//!
//! Validation runs synchronously after every change. A valid submit starts the
//! registration call in the background; success resets the form and raises a
//! banner whose hide timer is a follow-up task.

use super::actions::{
    FieldValue, RegistrationAction, RegistrationActionResult, RegistrationEvent, Submission,
};
use super::error::RegistrationError;
use crate::model::{validate, Field, FieldErrors, RegistrationForm};
use crate::services::SharedRegistrationService;
use async_trait::async_trait;
use serde::Serialize;
use session_actor::{Outcome, SessionEntity, Task};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, info, warn};

const FALLBACK_NAME: &str = "User";

/// Type-safe identifier for registration sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegistrationId(pub u32);

impl From<u32> for RegistrationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "registration_{}", self.0)
    }
}

/// Dependencies shared by every registration session.
#[derive(Clone)]
pub struct RegistrationContext {
    pub service: SharedRegistrationService,
    /// How long the success banner stays up.
    pub banner_duration: Duration,
}

/// One registration attempt.
#[derive(Debug, Clone)]
pub struct RegistrationSession {
    id: RegistrationId,
    form: RegistrationForm,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    submitting: bool,
    banner: Option<String>,
    banner_epoch: u64,
    last_error: Option<String>,
}

impl RegistrationSession {
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Every current rule violation, touched or not.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The violations the form displays: only those of touched fields.
    pub fn visible_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(*field))
            .map(|(field, error)| (*field, *error))
            .collect()
    }

    pub fn touched(&self) -> &BTreeSet<Field> {
        &self.touched
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submitting
    }

    /// The success message, while it is showing.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Why the last registration failed, until the next one starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn set_field(&mut self, field: Field, value: FieldValue) -> Result<(), RegistrationError> {
        let accepted = match value {
            FieldValue::Checked(accepted) if field == Field::Terms => {
                self.form.set_terms(accepted);
                true
            }
            FieldValue::Text(text) => self.form.set_text(field, text),
            FieldValue::Checked(_) => false,
        };
        if !accepted {
            return Err(RegistrationError::InvalidValue(field));
        }
        self.revalidate();
        Ok(())
    }

    fn revalidate(&mut self) {
        self.errors = validate(&self.form);
    }

    fn show_banner(&mut self, name: &str) -> u64 {
        let name = match name.trim() {
            "" => FALLBACK_NAME,
            trimmed => trimmed,
        };
        self.banner = Some(format!("Registration Successful! Welcome aboard, {name}."));
        self.banner_epoch += 1;
        self.banner_epoch
    }
}

#[async_trait]
impl SessionEntity for RegistrationSession {
    type Id = RegistrationId;
    type Create = ();
    type Action = RegistrationAction;
    type ActionResult = RegistrationActionResult;
    type Completion = RegistrationEvent;
    type Context = RegistrationContext;
    type Error = RegistrationError;

    fn from_create_params(id: RegistrationId, _: (), _ctx: &RegistrationContext) -> Result<Self, Self::Error> {
        let form = RegistrationForm::default();
        Ok(Self {
            id,
            errors: validate(&form),
            form,
            touched: BTreeSet::new(),
            submitting: false,
            banner: None,
            banner_epoch: 0,
            last_error: None,
        })
    }

    async fn handle_action(
        &mut self,
        action: RegistrationAction,
        ctx: &RegistrationContext,
    ) -> Result<Outcome<Self>, Self::Error> {
        match action {
            RegistrationAction::SetField { field, value } => {
                self.set_field(field, value)?;
                Ok(Outcome::reply(RegistrationActionResult::Updated {
                    valid: self.is_valid(),
                }))
            }
            RegistrationAction::MarkTouched(field) => {
                self.touched.insert(field);
                Ok(Outcome::reply(RegistrationActionResult::Touched))
            }
            RegistrationAction::Submit => {
                if self.submitting {
                    return Err(RegistrationError::SubmissionInProgress);
                }
                self.touched.extend(Field::ALL);
                self.revalidate();

                let payload = match self.form.payload() {
                    Some(payload) if self.is_valid() => payload,
                    _ => {
                        debug!(id = %self.id, errors = self.errors.len(), "Registration invalid");
                        return Ok(Outcome::reply(RegistrationActionResult::Submit(
                            Submission::Invalid(self.errors.clone()),
                        )));
                    }
                };

                self.submitting = true;
                self.last_error = None;
                info!(id = %self.id, "Submitting registration");

                let service = ctx.service.clone();
                let name = payload.name.clone();
                let reply = RegistrationActionResult::Submit(Submission::Started);
                Ok(Outcome::reply(reply).with_task(async move {
                    let result = service.register(payload).await;
                    RegistrationEvent::Finished { name, result }
                }))
            }
        }
    }

    async fn on_complete(
        &mut self,
        event: RegistrationEvent,
        ctx: &RegistrationContext,
    ) -> Option<Task<RegistrationEvent>> {
        match event {
            RegistrationEvent::Finished { name, result: Ok(()) } => {
                info!(id = %self.id, "Registration complete");
                self.submitting = false;
                self.form = RegistrationForm::default();
                self.touched.clear();
                self.revalidate();

                let epoch = self.show_banner(&name);
                let banner_duration = ctx.banner_duration;
                Some(Box::pin(async move {
                    tokio::time::sleep(banner_duration).await;
                    RegistrationEvent::BannerExpired { epoch }
                }))
            }
            RegistrationEvent::Finished { result: Err(e), .. } => {
                warn!(id = %self.id, error = %e, "Registration failed");
                self.submitting = false;
                self.last_error = Some(e.to_string());
                None
            }
            RegistrationEvent::BannerExpired { epoch } => {
                // A newer banner owns its own timer.
                if epoch == self.banner_epoch {
                    self.banner = None;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SimulatedRegistrationService;
    use std::sync::Arc;

    fn context() -> RegistrationContext {
        RegistrationContext {
            service: Arc::new(SimulatedRegistrationService::new(Duration::ZERO)),
            banner_duration: Duration::from_secs(5),
        }
    }

    fn session() -> RegistrationSession {
        RegistrationSession::from_create_params(RegistrationId(1), (), &context()).unwrap()
    }

    #[test]
    fn banner_uses_trimmed_name_or_fallback() {
        let mut session = session();
        assert_eq!(session.show_banner("  Ira "), 1);
        assert_eq!(
            session.banner(),
            Some("Registration Successful! Welcome aboard, Ira.")
        );

        assert_eq!(session.show_banner("   "), 2);
        assert_eq!(
            session.banner(),
            Some("Registration Successful! Welcome aboard, User.")
        );
    }

    #[tokio::test]
    async fn stale_banner_timer_is_ignored() {
        let ctx = context();
        let mut session = session();
        session.show_banner("Ira");
        session.show_banner("Dev");

        let follow_up = session
            .on_complete(RegistrationEvent::BannerExpired { epoch: 1 }, &ctx)
            .await;
        assert!(follow_up.is_none());
        assert!(session.banner().is_some());

        session
            .on_complete(RegistrationEvent::BannerExpired { epoch: 2 }, &ctx)
            .await;
        assert_eq!(session.banner(), None);
    }

    #[tokio::test]
    async fn checkbox_value_for_text_field_is_rejected() {
        let ctx = context();
        let mut session = session();
        let result = session
            .handle_action(
                RegistrationAction::SetField {
                    field: Field::Email,
                    value: FieldValue::Checked(true),
                },
                &ctx,
            )
            .await;
        assert_eq!(result.unwrap_err(), RegistrationError::InvalidValue(Field::Email));

        let result = session
            .handle_action(
                RegistrationAction::SetField {
                    field: Field::Terms,
                    value: FieldValue::Text("on".to_string()),
                },
                &ctx,
            )
            .await;
        assert_eq!(result.unwrap_err(), RegistrationError::InvalidValue(Field::Terms));
    }

    #[tokio::test]
    async fn touched_fields_gate_visible_errors() {
        let ctx = context();
        let mut session = session();
        assert_eq!(session.errors().len(), 6);
        assert!(session.visible_errors().is_empty());

        session
            .handle_action(RegistrationAction::MarkTouched(Field::Email), &ctx)
            .await
            .unwrap();
        let visible = session.visible_errors();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[&Field::Email].to_string(), "Email is required");
    }
}
