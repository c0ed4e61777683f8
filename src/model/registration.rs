//! # Registration Form
//!
//! Field values of one registration attempt and the rules that validate them.
//! Validation is a pure function of the values: [`validate`] is re-run after
//! every change and always evaluates every rule, so the result is the full
//! error mapping rather than the first failure.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone regex pattern"));

const MIN_PASSWORD_CHARS: usize = 8;

/// The form's fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Gender,
    Terms,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Password,
        Field::ConfirmPassword,
        Field::Gender,
        Field::Terms,
    ];

    /// The form-level name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Gender => "gender",
            Field::Terms => "terms",
        }
    }

    /// Whether values of this field must stay out of logs.
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a form field.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parses one of the three offered options; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// A single rule violation. The `Display` text is what the form shows.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    EmailInvalid,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Phone must be 10 digits")]
    PhoneInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Must contain uppercase, lowercase and number")]
    PasswordTooWeak,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please select a gender")]
    GenderRequired,
    #[error("You must accept the terms")]
    TermsRequired,
}

impl ValidationError {
    /// The field this violation is reported against.
    pub fn field(self) -> Field {
        match self {
            ValidationError::NameRequired => Field::Name,
            ValidationError::EmailRequired | ValidationError::EmailInvalid => Field::Email,
            ValidationError::PhoneRequired | ValidationError::PhoneInvalid => Field::Phone,
            ValidationError::PasswordRequired
            | ValidationError::PasswordTooShort
            | ValidationError::PasswordTooWeak => Field::Password,
            ValidationError::PasswordMismatch => Field::ConfirmPassword,
            ValidationError::GenderRequired => Field::Gender,
            ValidationError::TermsRequired => Field::Terms,
        }
    }
}

/// Field name to violation, for every field that currently fails.
pub type FieldErrors = BTreeMap<Field, ValidationError>;

/// The raw values of the registration form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: Option<Gender>,
    pub terms_accepted: bool,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("gender", &self.gender)
            .field("terms_accepted", &self.terms_accepted)
            .finish()
    }
}

impl RegistrationForm {
    /// Stores a text value. Gender text is parsed; the terms checkbox takes no
    /// text and is rejected with `false`.
    pub fn set_text(&mut self, field: Field, value: String) -> bool {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
            Field::Gender => self.gender = Gender::parse(&value),
            Field::Terms => return false,
        }
        true
    }

    pub fn set_terms(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// The values sent to the registration service. The confirmation field
    /// stays behind.
    pub fn payload(&self) -> Option<RegistrationPayload> {
        Some(RegistrationPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
            gender: self.gender?,
        })
    }
}

/// Runs every rule against the form.
pub fn validate(form: &RegistrationForm) -> FieldErrors {
    let checks = [
        check_name(&form.name),
        check_email(&form.email),
        check_phone(&form.phone),
        check_password(&form.password),
        (form.confirm_password != form.password).then_some(ValidationError::PasswordMismatch),
        form.gender.is_none().then_some(ValidationError::GenderRequired),
        (!form.terms_accepted).then_some(ValidationError::TermsRequired),
    ];
    checks
        .into_iter()
        .flatten()
        .map(|error| (error.field(), error))
        .collect()
}

fn check_name(name: &str) -> Option<ValidationError> {
    name.trim().is_empty().then_some(ValidationError::NameRequired)
}

fn check_email(email: &str) -> Option<ValidationError> {
    if email.is_empty() {
        Some(ValidationError::EmailRequired)
    } else if !EMAIL_PATTERN.is_match(email) {
        Some(ValidationError::EmailInvalid)
    } else {
        None
    }
}

fn check_phone(phone: &str) -> Option<ValidationError> {
    if phone.is_empty() {
        Some(ValidationError::PhoneRequired)
    } else if !PHONE_PATTERN.is_match(phone) {
        Some(ValidationError::PhoneInvalid)
    } else {
        None
    }
}

fn check_password(password: &str) -> Option<ValidationError> {
    if password.is_empty() {
        Some(ValidationError::PasswordRequired)
    } else if password.chars().count() < MIN_PASSWORD_CHARS {
        Some(ValidationError::PasswordTooShort)
    } else if !(password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit()))
    {
        Some(ValidationError::PasswordTooWeak)
    } else {
        None
    }
}

/// What the registration service receives.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub gender: Gender,
}

impl std::fmt::Debug for RegistrationPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("gender", &self.gender)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            password: "Abcdefg1".to_string(),
            confirm_password: "Abcdefg1".to_string(),
            gender: Some(Gender::Female),
            terms_accepted: true,
        }
    }

    #[test]
    fn empty_form_fails_every_field() {
        let errors = validate(&RegistrationForm::default());
        assert_eq!(errors.len(), 6);
        assert_eq!(errors[&Field::Name], ValidationError::NameRequired);
        assert_eq!(errors[&Field::Email], ValidationError::EmailRequired);
        assert_eq!(errors[&Field::Phone], ValidationError::PhoneRequired);
        assert_eq!(errors[&Field::Password], ValidationError::PasswordRequired);
        assert_eq!(errors[&Field::Gender], ValidationError::GenderRequired);
        assert_eq!(errors[&Field::Terms], ValidationError::TermsRequired);
        // Both passwords are empty, so they match.
        assert!(!errors.contains_key(&Field::ConfirmPassword));
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn whitespace_name_is_missing() {
        let mut form = valid_form();
        form.name = "   ".to_string();
        assert_eq!(validate(&form)[&Field::Name], ValidationError::NameRequired);
    }

    #[test]
    fn email_format() {
        assert_eq!(check_email("a@b.com"), None);
        assert_eq!(check_email("a@b"), Some(ValidationError::EmailInvalid));
        assert_eq!(check_email("a b@c.com"), Some(ValidationError::EmailInvalid));
        assert_eq!(check_email("a@@b.com"), Some(ValidationError::EmailInvalid));
        assert_eq!(check_email(""), Some(ValidationError::EmailRequired));
    }

    #[test]
    fn phone_needs_exactly_ten_digits() {
        assert_eq!(check_phone("0123456789"), None);
        assert_eq!(check_phone("012345678"), Some(ValidationError::PhoneInvalid));
        assert_eq!(check_phone("01234567890"), Some(ValidationError::PhoneInvalid));
        assert_eq!(check_phone("01234-6789"), Some(ValidationError::PhoneInvalid));
        // Non-ASCII digits do not count.
        assert_eq!(check_phone("٠١٢٣٤٥٦٧٨٩"), Some(ValidationError::PhoneInvalid));
    }

    #[test]
    fn password_rules() {
        assert_eq!(check_password("Abcdefg1"), None);
        assert_eq!(check_password("abcdefg1"), Some(ValidationError::PasswordTooWeak));
        assert_eq!(check_password("ABCDEFG1"), Some(ValidationError::PasswordTooWeak));
        assert_eq!(check_password("Abcdefgh"), Some(ValidationError::PasswordTooWeak));
        assert_eq!(check_password("Abc1"), Some(ValidationError::PasswordTooShort));
        // Length is counted in characters, not bytes.
        assert_eq!(check_password("Ab1éééé"), Some(ValidationError::PasswordTooShort));
        assert_eq!(check_password("Ab1ééééé"), None);
    }

    #[test]
    fn mismatch_is_reported_alongside_required_password() {
        let mut form = valid_form();
        form.password.clear();
        let errors = validate(&form);
        assert_eq!(errors[&Field::Password], ValidationError::PasswordRequired);
        assert_eq!(errors[&Field::ConfirmPassword], ValidationError::PasswordMismatch);
    }

    #[test]
    fn gender_text_parsing() {
        let mut form = valid_form();
        assert!(form.set_text(Field::Gender, "Other".to_string()));
        assert_eq!(form.gender, Some(Gender::Other));
        form.set_text(Field::Gender, "male".to_string());
        assert_eq!(form.gender, None);
        assert!(!form.set_text(Field::Terms, "yes".to_string()));
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
        assert_eq!(
            "nickname".parse::<Field>(),
            Err(UnknownField("nickname".to_string()))
        );
    }

    #[test]
    fn passwords_never_appear_in_debug_output() {
        let form = valid_form();
        let payload = form.payload().unwrap();
        for rendered in [format!("{form:?}"), format!("{payload:?}")] {
            assert!(!rendered.contains("Abcdefg1"), "{rendered}");
            assert!(rendered.contains("<redacted>"));
        }
    }

    #[test]
    fn messages_match_form_text() {
        assert_eq!(ValidationError::PhoneInvalid.to_string(), "Phone must be 10 digits");
        assert_eq!(
            ValidationError::PasswordTooWeak.to_string(),
            "Must contain uppercase, lowercase and number"
        );
    }
}
