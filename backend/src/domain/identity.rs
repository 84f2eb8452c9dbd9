//! Dual identifier scheme shared by every resource kind.
//!
//! Records carry two identifiers that are never interchangeable:
//!
//! - [`SurrogateKey`] is assigned by the store on insert and only addresses
//!   rows internally. It has no serde support so it cannot reach the wire.
//! - [`ExternalId`] is a random 128-bit identifier assigned once, before the
//!   first write. It is the only identifier clients and other services see.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier exposed to clients and other services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(Uuid);

impl ExternalId {
    /// Produce a new random (v4) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ExternalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ExternalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Store-assigned key used for internal addressing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurrogateKey(i64);

impl SurrogateKey {
    /// Wrap a key handed out by a store.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw key value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Fill `slot` with a generated identifier unless it already holds one.
///
/// Returns the identifier now held by the slot. An existing value is never
/// overwritten.
pub(crate) fn assign_if_absent(slot: &mut Option<ExternalId>) -> ExternalId {
    *slot.get_or_insert_with(ExternalId::generate)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_do_not_collide() {
        let ids: HashSet<_> = (0..1_000).map(|_| ExternalId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn assign_if_absent_fills_empty_slot_once() {
        let mut slot = None;
        let first = assign_if_absent(&mut slot);
        let second = assign_if_absent(&mut slot);
        assert_eq!(slot, Some(first));
        assert_eq!(first, second);
    }

    #[test]
    fn assign_if_absent_keeps_existing_value() {
        let existing = ExternalId::generate();
        let mut slot = Some(existing);
        assert_eq!(assign_if_absent(&mut slot), existing);
        assert_eq!(slot, Some(existing));
    }

    #[test]
    fn serialises_as_bare_uuid_string() {
        let id: ExternalId = "123e4567-e89b-12d3-a456-426614174000"
            .parse()
            .expect("valid uuid");
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"123e4567-e89b-12d3-a456-426614174000\"");
    }
}
