//! Commands understood by a registration session.

use crate::model::Field;
use crate::model::FieldErrors;
use crate::services::SubmissionError;
use std::fmt::Debug;

/// A new value for one form field.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text inputs and the gender choice.
    Text(String),
    /// The terms checkbox.
    Checked(bool),
}

#[derive(Clone, PartialEq, Eq)]
pub enum RegistrationAction {
    /// Stores a field value and revalidates the whole form.
    SetField { field: Field, value: FieldValue },
    /// The field received and lost focus; its error may now be shown.
    MarkTouched(Field),
    /// Touches every field, revalidates and, if valid, registers.
    Submit,
}

// Password values must never reach the logs.
impl Debug for RegistrationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationAction::SetField {
                field,
                value: FieldValue::Text(_),
            } if field.is_secret() => f
                .debug_struct("SetField")
                .field("field", field)
                .field("value", &"<redacted>")
                .finish(),
            RegistrationAction::SetField { field, value } => f
                .debug_struct("SetField")
                .field("field", field)
                .field("value", value)
                .finish(),
            RegistrationAction::MarkTouched(field) => f.debug_tuple("MarkTouched").field(field).finish(),
            RegistrationAction::Submit => f.write_str("Submit"),
        }
    }
}

impl Debug for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            FieldValue::Checked(checked) => f.debug_tuple("Checked").field(checked).finish(),
        }
    }
}

/// Results from RegistrationActions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationActionResult {
    /// The form after the change: `true` if it is now valid.
    Updated { valid: bool },
    Touched,
    Submit(Submission),
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The form was valid and has been handed to the registration service.
    Started,
    /// Submission was aborted; every violation is now visible.
    Invalid(FieldErrors),
}

/// Output of a session's background work.
#[derive(Debug)]
pub enum RegistrationEvent {
    /// The service answered. `name` is the name that was registered.
    Finished {
        name: String,
        result: Result<(), SubmissionError>,
    },
    /// The success banner's display time ran out.
    BannerExpired { epoch: u64 },
}
