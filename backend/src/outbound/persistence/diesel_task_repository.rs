//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{ExternalId, NewRecord, SurrogateKey, Task, TaskFields, Update};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTaskRow, TaskRow, TaskUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> TaskPersistenceError {
    map_pool_error(error, TaskPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> TaskPersistenceError {
    map_diesel_error(
        error,
        TaskPersistenceError::query,
        TaskPersistenceError::connection,
    )
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task::new(
            SurrogateKey::new(row.id),
            ExternalId::from_uuid(row.uuid),
            TaskFields {
                assignee: row.assignee_uuid.map(ExternalId::from_uuid),
                description: row.description,
            },
        )
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &NewRecord<TaskFields>) -> Result<Task, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let fields = task.fields();
        let new_row = NewTaskRow {
            uuid: *task.external_id().as_uuid(),
            assignee_uuid: fields.assignee.map(|id| *id.as_uuid()),
            description: &fields.description,
        };

        diesel::insert_into(tasks::table)
            .values(&new_row)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(&mut conn)
            .await
            .map(Task::from)
            .map_err(map_diesel)
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        tasks::table
            .filter(tasks::uuid.eq(external_id.as_uuid()))
            .select(TaskRow::as_select())
            .first::<TaskRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Task::from))
            .map_err(map_diesel)
    }

    async fn list(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<TaskRow> = tasks::table
            .order(tasks::id.asc())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn apply_update(
        &self,
        key: SurrogateKey,
        update: Update<TaskFields>,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // The row lock holds off concurrent writers until the merged row is
        // committed.
        conn.transaction(|conn| {
            async move {
                let Some(row) = tasks::table
                    .find(key.get())
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(conn)
                    .await
                    .optional()?
                else {
                    return Ok(None);
                };
                let mut task = Task::from(row);
                task.apply(update);
                let fields = task.fields();
                let changes = TaskUpdate {
                    assignee_uuid: fields.assignee.map(|id| *id.as_uuid()),
                    description: &fields.description,
                };

                diesel::update(tasks::table.find(key.get()))
                    .set(&changes)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(conn)
                    .await
                    .map(|row| Some(Task::from(row)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel)
    }

    async fn delete(&self, key: SurrogateKey) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed = diesel::delete(tasks::table.find(key.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(removed > 0)
    }
}
