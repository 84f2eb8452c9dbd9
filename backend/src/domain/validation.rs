//! Payload validation helpers.
//!
//! Validation collects every failing field rather than stopping at the
//! first, so clients can fix a request in one round trip.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All validation failures for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Structured problem details listing each failing field.
    pub fn to_details(&self) -> Value {
        json!({ "fields": self.0 })
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            f.write_str(&error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Require a non-blank value, recording a failure otherwise.
pub fn require_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.push(field, format!("{field} must not be blank"));
            None
        }
    }
}

/// Accept an absent value, but reject one that is present and blank.
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(text) if text.trim().is_empty() => {
            errors.push(field, format!("{field} must not be blank"));
            None
        }
        other => other,
    }
}
