//! Task registry data model.

use super::identity::ExternalId;
use super::merge::{Mergeable, merge_value};
use super::record::Record;
use super::validation::{FieldErrors, optional_text, require_text};

/// Stored task.
pub type Task = Record<TaskFields>;

/// Longest accepted description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Mutable task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    /// External identifier of the assigned user, if any.
    pub assignee: Option<ExternalId>,
    pub description: String,
}

/// Sparse task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub assignee: Option<ExternalId>,
    pub description: Option<String>,
}

impl TaskPatch {
    /// Assignee carried by the patch; `None` leaves the current one.
    pub fn assignee(&self) -> Option<ExternalId> {
        self.assignee
    }
}

impl Mergeable for TaskFields {
    type Patch = TaskPatch;

    fn replace_with(&mut self, incoming: Self) {
        *self = incoming;
    }

    fn merge_from(&mut self, patch: Self::Patch) {
        if patch.assignee.is_some() {
            self.assignee = patch.assignee;
        }
        merge_value(&mut self.description, patch.description);
    }
}

/// Unvalidated task payload as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub assignee: Option<ExternalId>,
    pub description: Option<String>,
}

impl TaskInput {
    /// Validate as a complete record (create and full replace).
    pub fn into_fields(self) -> Result<TaskFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        let description = require_text(&mut errors, "description", self.description)
            .and_then(|text| check_length(&mut errors, text));
        match description {
            Some(description) if errors.is_empty() => Ok(TaskFields {
                assignee: self.assignee,
                description,
            }),
            _ => Err(errors),
        }
    }

    /// Validate as a partial update; absent fields are left alone.
    pub fn into_patch(self) -> Result<TaskPatch, FieldErrors> {
        let mut errors = FieldErrors::default();
        let description = optional_text(&mut errors, "description", self.description)
            .and_then(|text| check_length(&mut errors, text));
        if errors.is_empty() {
            Ok(TaskPatch {
                assignee: self.assignee,
                description,
            })
        } else {
            Err(errors)
        }
    }
}

fn check_length(errors: &mut FieldErrors, text: String) -> Option<String> {
    if text.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push(
            "description",
            format!("description must be at most {DESCRIPTION_MAX_CHARS} characters"),
        );
        None
    } else {
        Some(text)
    }
}
