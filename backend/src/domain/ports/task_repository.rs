//! Port abstraction for task persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{ExternalId, NewRecord, SurrogateKey, Task, TaskFields, Update};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
    }
}

/// Storage for task records.
///
/// The assignee column is a plain value: it is never checked against the
/// user store, and deleting a user leaves its tasks untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task and return it with its assigned surrogate key.
    async fn insert(&self, task: &NewRecord<TaskFields>) -> Result<Task, TaskPersistenceError>;

    /// Fetch a task by external identifier.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Task>, TaskPersistenceError>;

    /// Every stored task, ordered by surrogate key.
    async fn list(&self) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Re-read the row with `key`, apply `update` to it and write it back as
    /// one atomic step. Concurrent updates of the same row are serialised.
    /// Returns `None` when the row no longer exists.
    async fn apply_update(
        &self,
        key: SurrogateKey,
        update: Update<TaskFields>,
    ) -> Result<Option<Task>, TaskPersistenceError>;

    /// Remove the row with `key`. Returns whether a row was removed.
    async fn delete(&self, key: SurrogateKey) -> Result<bool, TaskPersistenceError>;
}
