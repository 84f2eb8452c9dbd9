//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{ExternalId, NewRecord, SurrogateKey, Update, User, UserFields};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Storage for user records.
///
/// Adapters address rows by [`SurrogateKey`] for writes and by
/// [`ExternalId`] for lookups. Lists are ordered by surrogate key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned surrogate key.
    async fn insert(&self, user: &NewRecord<UserFields>) -> Result<User, UserPersistenceError>;

    /// Fetch a user by external identifier.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Every stored user.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Re-read the row with `key`, apply `update` and write it back
    /// atomically. The email uniqueness check sees the merged row.
    /// Returns `None` when the row no longer exists.
    async fn apply_update(
        &self,
        key: SurrogateKey,
        update: Update<UserFields>,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove the row with `key`. Returns whether a row was removed.
    async fn delete(&self, key: SurrogateKey) -> Result<bool, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_formats_message() {
        let err = UserPersistenceError::duplicate_email("ada@example.com");
        assert_eq!(err.to_string(), "email ada@example.com is already registered");
    }

    #[test]
    fn query_error_formats_message() {
        let err = UserPersistenceError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
