//! Task registry service.
//!
//! Implements the [`TaskRegistry`] driving port on top of a
//! [`TaskRepository`] and an [`AssigneeValidator`]. The order of work on
//! every write is fixed: load the target (for updates), validate the payload
//! and the assignee, then issue one store call keyed by surrogate key. For
//! updates that call re-reads, merges and writes the row atomically, so a
//! concurrent update is never overwritten with a stale copy. Nothing is
//! written when any earlier step fails.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::assignee::AssigneeValidator;
use crate::domain::failure::{RegistryFailure, ResourceKind};
use crate::domain::ports::{TaskPersistenceError, TaskRegistry, TaskRepository, UserDirectory};
use crate::domain::{Draft, Error, ExternalId, Task, TaskFields, TaskInput, Update};

fn map_repository_error(error: TaskPersistenceError) -> RegistryFailure {
    match error {
        TaskPersistenceError::Connection { message } => RegistryFailure::StoreUnavailable {
            kind: ResourceKind::Task,
            message,
        },
        TaskPersistenceError::Query { message } => RegistryFailure::Unhandled {
            kind: ResourceKind::Task,
            message,
        },
    }
}

/// Task service implementing the task registry driving port.
pub struct TaskService<R: ?Sized, D: ?Sized> {
    tasks: Arc<R>,
    assignees: AssigneeValidator<D>,
}

impl<R: ?Sized, D: ?Sized> Clone for TaskService<R, D> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            assignees: self.assignees.clone(),
        }
    }
}

impl<R, D> TaskService<R, D>
where
    R: TaskRepository + ?Sized,
    D: UserDirectory + ?Sized,
{
    /// Create a service over the given repository and user directory.
    pub fn new(tasks: Arc<R>, directory: Arc<D>) -> Self {
        Self {
            tasks,
            assignees: AssigneeValidator::new(directory),
        }
    }

    async fn load(&self, external_id: ExternalId) -> Result<Task, RegistryFailure> {
        self.tasks
            .find_by_external_id(&external_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| RegistryFailure::not_found(ResourceKind::Task, external_id))
    }

    async fn validate_assignee(&self, assignee: Option<ExternalId>) -> Result<(), RegistryFailure> {
        self.assignees
            .validate_assignee(assignee)
            .await
            .map_err(|failure| RegistryFailure::AssigneeInvalid {
                assignee: failure.assignee,
            })
    }

    pub async fn create(&self, input: TaskInput) -> Result<Task, RegistryFailure> {
        let fields = input
            .into_fields()
            .map_err(RegistryFailure::InvalidPayload)?;
        self.validate_assignee(fields.assignee).await?;
        let new_task = Draft::new(fields).into_new_record();
        let task = self
            .tasks
            .insert(&new_task)
            .await
            .map_err(map_repository_error)?;
        info!(task = %task.external_id(), "task created");
        Ok(task)
    }

    pub async fn get(&self, external_id: ExternalId) -> Result<Task, RegistryFailure> {
        self.load(external_id).await
    }

    pub async fn list(&self) -> Result<Vec<Task>, RegistryFailure> {
        self.tasks.list().await.map_err(map_repository_error)
    }

    /// Apply `update` to the task with `external_id`.
    ///
    /// A full replace validates whatever assignee it carries; a partial
    /// merge validates only an assignee it explicitly provides.
    pub async fn update(
        &self,
        external_id: ExternalId,
        update: Update<TaskFields>,
    ) -> Result<Task, RegistryFailure> {
        let mode = update.mode();
        let task = self.load(external_id).await?;
        let assignee = match &update {
            Update::Replace(fields) => fields.assignee,
            Update::Merge(patch) => patch.assignee(),
        };
        self.validate_assignee(assignee).await?;
        let stored = self
            .tasks
            .apply_update(task.surrogate_key(), update)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| RegistryFailure::not_found(ResourceKind::Task, external_id))?;
        info!(task = %external_id, %mode, "task updated");
        Ok(stored)
    }

    pub async fn delete(&self, external_id: ExternalId) -> Result<(), RegistryFailure> {
        let task = self.load(external_id).await?;
        let removed = self
            .tasks
            .delete(task.surrogate_key())
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(RegistryFailure::not_found(ResourceKind::Task, external_id));
        }
        info!(task = %external_id, "task deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, D> TaskRegistry for TaskService<R, D>
where
    R: TaskRepository + ?Sized,
    D: UserDirectory + ?Sized,
{
    async fn create_task(&self, input: TaskInput) -> Result<Task, Error> {
        Ok(self.create(input).await?)
    }

    async fn get_task(&self, external_id: ExternalId) -> Result<Task, Error> {
        Ok(self.get(external_id).await?)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, Error> {
        Ok(self.list().await?)
    }

    async fn replace_task(&self, external_id: ExternalId, input: TaskInput) -> Result<Task, Error> {
        let fields = input
            .into_fields()
            .map_err(RegistryFailure::InvalidPayload)?;
        Ok(self.update(external_id, Update::Replace(fields)).await?)
    }

    async fn patch_task(&self, external_id: ExternalId, input: TaskInput) -> Result<Task, Error> {
        let patch = input
            .into_patch()
            .map_err(RegistryFailure::InvalidPayload)?;
        Ok(self.update(external_id, Update::Merge(patch)).await?)
    }

    async fn delete_task(&self, external_id: ExternalId) -> Result<(), Error> {
        Ok(self.delete(external_id).await?)
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
