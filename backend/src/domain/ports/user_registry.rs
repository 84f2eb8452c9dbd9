//! Driving port for the user registry.

use async_trait::async_trait;

use crate::domain::{Error, ExternalId, User, UserInput};

/// Operations inbound adapters may invoke on the user registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, input: UserInput) -> Result<User, Error>;

    async fn get_user(&self, external_id: ExternalId) -> Result<User, Error>;

    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Overwrite every mutable field of an existing user.
    async fn replace_user(&self, external_id: ExternalId, input: UserInput) -> Result<User, Error>;

    /// Overwrite only the provided fields of an existing user.
    async fn patch_user(&self, external_id: ExternalId, input: UserInput) -> Result<User, Error>;

    async fn delete_user(&self, external_id: ExternalId) -> Result<(), Error>;
}
