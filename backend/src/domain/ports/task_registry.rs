//! Driving port for the task registry.

use async_trait::async_trait;

use crate::domain::{Error, ExternalId, Task, TaskInput};

/// Operations inbound adapters may invoke on the task registry.
///
/// Every write that names an assignee confirms it with the user registry
/// before anything is stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRegistry: Send + Sync {
    /// Validate and store a new task.
    async fn create_task(&self, input: TaskInput) -> Result<Task, Error>;

    async fn get_task(&self, external_id: ExternalId) -> Result<Task, Error>;

    async fn list_tasks(&self) -> Result<Vec<Task>, Error>;

    /// Overwrite every mutable field of an existing task, clearing the
    /// assignee when the input omits it.
    async fn replace_task(&self, external_id: ExternalId, input: TaskInput) -> Result<Task, Error>;

    /// Overwrite only the provided fields of an existing task.
    async fn patch_task(&self, external_id: ExternalId, input: TaskInput) -> Result<Task, Error>;

    async fn delete_task(&self, external_id: ExternalId) -> Result<(), Error>;
}
