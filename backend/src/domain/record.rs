//! Record lifecycle: draft, new record, stored record.
//!
//! A [`Draft`] is what a caller proposes. Turning it into a [`NewRecord`]
//! assigns the external identifier exactly once, before the first write. The
//! store then hands back a [`Record`] carrying both identifiers.

use super::identity::{ExternalId, SurrogateKey, assign_if_absent};

/// Proposed record whose external identifier may not be assigned yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft<F> {
    external_id: Option<ExternalId>,
    fields: F,
}

impl<F> Draft<F> {
    /// Start a draft with no external identifier.
    #[must_use]
    pub fn new(fields: F) -> Self {
        Self {
            external_id: None,
            fields,
        }
    }

    /// Assign an external identifier unless one is already present.
    fn assign_external_id(&mut self) -> ExternalId {
        assign_if_absent(&mut self.external_id)
    }

    /// Finalise the draft for insertion.
    #[must_use]
    pub fn into_new_record(mut self) -> NewRecord<F> {
        let external_id = self.assign_external_id();
        NewRecord {
            external_id,
            fields: self.fields,
        }
    }
}

/// Record ready for insertion; the store assigns the surrogate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord<F> {
    external_id: ExternalId,
    fields: F,
}

impl<F> NewRecord<F> {
    /// Identifier the record will be stored under.
    #[must_use]
    pub fn external_id(&self) -> ExternalId {
        self.external_id
    }

    /// Mutable fields to insert.
    #[must_use]
    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Attach the store-assigned key.
    #[must_use]
    pub fn into_record(self, surrogate_key: SurrogateKey) -> Record<F> {
        Record::new(surrogate_key, self.external_id, self.fields)
    }
}

/// Persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<F> {
    surrogate_key: SurrogateKey,
    external_id: ExternalId,
    fields: F,
}

impl<F> Record<F> {
    /// Rebuild a stored record from its parts, as adapters do after a read.
    #[must_use]
    pub fn new(surrogate_key: SurrogateKey, external_id: ExternalId, fields: F) -> Self {
        Self {
            surrogate_key,
            external_id,
            fields,
        }
    }

    /// Store key addressing this row. Never exposed to clients.
    #[must_use]
    pub fn surrogate_key(&self) -> SurrogateKey {
        self.surrogate_key
    }

    /// Identifier clients and other services use.
    #[must_use]
    pub fn external_id(&self) -> ExternalId {
        self.external_id
    }

    /// Current mutable fields.
    #[must_use]
    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Consume the record, keeping only its fields.
    #[must_use]
    pub fn into_fields(self) -> F {
        self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_assigns_identifier_exactly_once() {
        let mut draft = Draft::new("fields");
        assert!(draft.external_id.is_none());
        let assigned = draft.assign_external_id();
        assert_eq!(draft.assign_external_id(), assigned);
        let record = draft.into_new_record();
        assert_eq!(record.external_id(), assigned);
    }

    #[test]
    fn stored_record_keeps_both_identifiers() {
        let new_record = Draft::new(7_u8).into_new_record();
        let external_id = new_record.external_id();
        let record = new_record.into_record(SurrogateKey::new(3));
        assert_eq!(record.surrogate_key(), SurrogateKey::new(3));
        assert_eq!(record.external_id(), external_id);
        assert_eq!(*record.fields(), 7);
    }
}
