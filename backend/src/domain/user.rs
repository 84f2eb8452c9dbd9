//! User registry data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::merge::{Mergeable, merge_value};
use super::record::Record;
use super::validation::{FieldErrors, optional_text, require_text};

/// Stored user.
pub type User = Record<UserFields>;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Why a string was rejected as an [`Email`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailValidationError {
    Blank,
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "email must not be blank"),
            Self::Malformed => write!(f, "email must be a well-formed email address"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, EmailValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EmailValidationError::Blank);
        }
        if !email_regex().is_match(&value) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mutable user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: Email,
}

/// Sparse user update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
}

impl Mergeable for UserFields {
    type Patch = UserPatch;

    fn replace_with(&mut self, incoming: Self) {
        *self = incoming;
    }

    fn merge_from(&mut self, patch: Self::Patch) {
        merge_value(&mut self.name, patch.name);
        merge_value(&mut self.email, patch.email);
    }
}

/// Unvalidated user payload as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserInput {
    /// Validate as a complete record (create and full replace).
    pub fn into_fields(self) -> Result<UserFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = require_text(&mut errors, "name", self.name);
        let email = parse_email(&mut errors, self.email.unwrap_or_default());
        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(UserFields { name, email }),
            _ => Err(errors),
        }
    }

    /// Validate as a partial update; absent fields are left alone.
    pub fn into_patch(self) -> Result<UserPatch, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = optional_text(&mut errors, "name", self.name);
        let email = self.email.and_then(|raw| parse_email(&mut errors, raw));
        if errors.is_empty() {
            Ok(UserPatch { name, email })
        } else {
            Err(errors)
        }
    }
}

fn parse_email(errors: &mut FieldErrors, raw: String) -> Option<Email> {
    Email::new(raw)
        .map_err(|error| errors.push("email", error.to_string()))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input(name: Option<&str>, email: Option<&str>) -> UserInput {
        UserInput {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
        }
    }

    #[rstest]
    #[case("ada@example.com")]
    #[case("a.b+tag@sub.example.org")]
    fn accepts_well_formed_email(#[case] raw: &str) {
        assert_eq!(Email::new(raw).map(String::from).as_deref(), Ok(raw));
    }

    #[rstest]
    #[case("", EmailValidationError::Blank)]
    #[case("   ", EmailValidationError::Blank)]
    #[case("not-an-email", EmailValidationError::Malformed)]
    #[case("ada@example", EmailValidationError::Malformed)]
    #[case("ada @example.com", EmailValidationError::Malformed)]
    fn rejects_bad_email(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(Email::new(raw), Err(expected));
    }

    #[test]
    fn full_payload_collects_every_failure() {
        let errors = input(None, Some("nope"))
            .into_fields()
            .expect_err("invalid payload");
        assert_eq!(
            errors.to_string(),
            "name must not be blank; email must be a well-formed email address"
        );
    }

    #[test]
    fn full_payload_requires_email() {
        let errors = input(Some("Ada"), None)
            .into_fields()
            .expect_err("missing email");
        assert_eq!(errors.to_string(), "email must not be blank");
    }

    #[test]
    fn patch_accepts_partial_payload() {
        let patch = input(Some("Ada"), None).into_patch().expect("valid patch");
        assert_eq!(patch.name.as_deref(), Some("Ada"));
        assert!(patch.email.is_none());
    }

    #[test]
    fn patch_rejects_present_but_blank_name() {
        let errors = input(Some(" "), None).into_patch().expect_err("blank name");
        assert_eq!(errors.to_string(), "name must not be blank");
    }

    #[test]
    fn merge_only_touches_provided_fields() {
        let mut fields = input(Some("Ada"), Some("ada@example.com"))
            .into_fields()
            .expect("valid");
        fields.merge_from(UserPatch {
            name: None,
            email: Some(Email::new("lovelace@example.com").expect("valid")),
        });
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.email.as_str(), "lovelace@example.com");
    }
}
