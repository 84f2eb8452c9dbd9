//! Update semantics shared by every resource kind.
//!
//! A full replace overwrites every mutable field with the incoming value,
//! absent optionals included. A partial merge only touches the fields the
//! caller provided. Neither mode changes the surrogate key or the external
//! identifier of the target record.

use std::fmt;

use super::record::Record;

/// Resource fields that support both update modes.
pub trait Mergeable {
    /// Sparse representation where `None` means "leave unchanged".
    type Patch;

    /// Overwrite every mutable field.
    fn replace_with(&mut self, incoming: Self);

    /// Overwrite only the fields present in `patch`.
    fn merge_from(&mut self, patch: Self::Patch);
}

/// How an update request treats absent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    FullReplace,
    PartialMerge,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FullReplace => "full_replace",
            Self::PartialMerge => "partial_merge",
        })
    }
}

/// An update request paired with its mode.
pub enum Update<F: Mergeable> {
    Replace(F),
    Merge(F::Patch),
}

impl<F: Mergeable> Update<F> {
    pub fn mode(&self) -> UpdateMode {
        match self {
            Self::Replace(_) => UpdateMode::FullReplace,
            Self::Merge(_) => UpdateMode::PartialMerge,
        }
    }
}

/// Overwrite `target` when `incoming` carries a value.
pub fn merge_value<T>(target: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *target = value;
    }
}

impl<F: Mergeable> Record<F> {
    /// Apply `update` to the mutable fields, leaving both identifiers intact.
    pub fn apply(&mut self, update: Update<F>) {
        match update {
            Update::Replace(fields) => self.fields_mut().replace_with(fields),
            Update::Merge(patch) => self.fields_mut().merge_from(patch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::{ExternalId, SurrogateKey};

    #[derive(Debug, Clone, PartialEq)]
    struct Fields {
        label: String,
        note: Option<String>,
    }

    struct FieldsPatch {
        label: Option<String>,
        note: Option<String>,
    }

    impl Mergeable for Fields {
        type Patch = FieldsPatch;

        fn replace_with(&mut self, incoming: Self) {
            *self = incoming;
        }

        fn merge_from(&mut self, patch: Self::Patch) {
            merge_value(&mut self.label, patch.label);
            if patch.note.is_some() {
                self.note = patch.note;
            }
        }
    }

    fn record() -> Record<Fields> {
        Record::new(
            SurrogateKey::new(1),
            ExternalId::generate(),
            Fields {
                label: "old".into(),
                note: Some("kept".into()),
            },
        )
    }

    #[test]
    fn replace_clears_absent_optionals() {
        let mut target = record();
        let external_id = target.external_id();
        target.apply(Update::Replace(Fields {
            label: "new".into(),
            note: None,
        }));
        assert_eq!(target.fields().label, "new");
        assert_eq!(target.fields().note, None);
        assert_eq!(target.external_id(), external_id);
        assert_eq!(target.surrogate_key(), SurrogateKey::new(1));
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let mut target = record();
        target.apply(Update::Merge(FieldsPatch {
            label: Some("new".into()),
            note: None,
        }));
        assert_eq!(target.fields().label, "new");
        assert_eq!(target.fields().note.as_deref(), Some("kept"));
    }

    #[test]
    fn empty_merge_is_a_no_op() {
        let mut target = record();
        let before = target.clone();
        target.apply(Update::Merge(FieldsPatch {
            label: None,
            note: None,
        }));
        assert_eq!(target, before);
    }
}
