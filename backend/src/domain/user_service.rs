//! User registry service.
//!
//! Implements the [`UserRegistry`] driving port on top of a
//! [`UserRepository`]. Every write first reads and validates, then performs a
//! single store call keyed by surrogate key. Updates merge inside that call
//! so concurrent writers never overwrite each other with stale fields.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::failure::{RegistryFailure, ResourceKind};
use crate::domain::ports::{UserPersistenceError, UserRegistry, UserRepository};
use crate::domain::{Draft, Error, ExternalId, Update, User, UserFields, UserInput};

fn map_repository_error(error: UserPersistenceError) -> RegistryFailure {
    match error {
        UserPersistenceError::Connection { message } => RegistryFailure::StoreUnavailable {
            kind: ResourceKind::User,
            message,
        },
        UserPersistenceError::Query { message } => RegistryFailure::Unhandled {
            kind: ResourceKind::User,
            message,
        },
        UserPersistenceError::DuplicateEmail { email } => RegistryFailure::DuplicateEmail { email },
    }
}

/// User service implementing the user registry driving port.
pub struct UserService<R: ?Sized> {
    users: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    /// Create a service over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    async fn load(&self, external_id: ExternalId) -> Result<User, RegistryFailure> {
        self.users
            .find_by_external_id(&external_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| RegistryFailure::not_found(ResourceKind::User, external_id))
    }

    pub async fn create(&self, input: UserInput) -> Result<User, RegistryFailure> {
        let fields = input
            .into_fields()
            .map_err(RegistryFailure::InvalidPayload)?;
        let new_user = Draft::new(fields).into_new_record();
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_repository_error)?;
        info!(user = %user.external_id(), "user created");
        Ok(user)
    }

    pub async fn get(&self, external_id: ExternalId) -> Result<User, RegistryFailure> {
        self.load(external_id).await
    }

    pub async fn list(&self) -> Result<Vec<User>, RegistryFailure> {
        self.users.list().await.map_err(map_repository_error)
    }

    pub async fn update(
        &self,
        external_id: ExternalId,
        update: Update<UserFields>,
    ) -> Result<User, RegistryFailure> {
        let mode = update.mode();
        let user = self.load(external_id).await?;
        let stored = self
            .users
            .apply_update(user.surrogate_key(), update)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| RegistryFailure::not_found(ResourceKind::User, external_id))?;
        info!(user = %external_id, %mode, "user updated");
        Ok(stored)
    }

    pub async fn delete(&self, external_id: ExternalId) -> Result<(), RegistryFailure> {
        let user = self.load(external_id).await?;
        let removed = self
            .users
            .delete(user.surrogate_key())
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(RegistryFailure::not_found(ResourceKind::User, external_id));
        }
        info!(user = %external_id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UserRegistry for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, input: UserInput) -> Result<User, Error> {
        Ok(self.create(input).await?)
    }

    async fn get_user(&self, external_id: ExternalId) -> Result<User, Error> {
        Ok(self.get(external_id).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.list().await?)
    }

    async fn replace_user(&self, external_id: ExternalId, input: UserInput) -> Result<User, Error> {
        let fields = input
            .into_fields()
            .map_err(RegistryFailure::InvalidPayload)?;
        Ok(self.update(external_id, Update::Replace(fields)).await?)
    }

    async fn patch_user(&self, external_id: ExternalId, input: UserInput) -> Result<User, Error> {
        let patch = input
            .into_patch()
            .map_err(RegistryFailure::InvalidPayload)?;
        Ok(self.update(external_id, Update::Merge(patch)).await?)
    }

    async fn delete_user(&self, external_id: ExternalId) -> Result<(), Error> {
        Ok(self.delete(external_id).await?)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
