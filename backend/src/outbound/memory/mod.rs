//! In-process repositories used when no database URL is configured.
//!
//! Each repository keeps its rows in a [`BTreeMap`] keyed by surrogate key,
//! so listing order matches insertion order the way an auto-increment
//! column would.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    TaskPersistenceError, TaskRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    ExternalId, Mergeable, NewRecord, Record, SurrogateKey, Task, TaskFields, Update, User,
    UserFields,
};

struct Table<F> {
    next_key: i64,
    rows: BTreeMap<SurrogateKey, Record<F>>,
}

impl<F: Clone> Table<F> {
    fn new() -> Self {
        Self {
            next_key: 1,
            rows: BTreeMap::new(),
        }
    }

    fn insert(&mut self, record: NewRecord<F>) -> Record<F> {
        let key = SurrogateKey::new(self.next_key);
        self.next_key += 1;
        let stored = record.into_record(key);
        self.rows.insert(key, stored.clone());
        stored
    }

    fn find(&self, external_id: &ExternalId) -> Option<Record<F>> {
        self.rows
            .values()
            .find(|row| row.external_id() == *external_id)
            .cloned()
    }

    fn list(&self) -> Vec<Record<F>> {
        self.rows.values().cloned().collect()
    }

    fn delete(&mut self, key: SurrogateKey) -> bool {
        self.rows.remove(&key).is_some()
    }
}

/// In-memory user store enforcing unique emails.
pub struct InMemoryUserRepository {
    table: Mutex<Table<UserFields>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Clone + Mergeable> Table<F> {
    /// Current row with `update` applied, not yet written back.
    fn merged(&self, key: SurrogateKey, update: Update<F>) -> Option<Record<F>> {
        let mut row = self.rows.get(&key)?.clone();
        row.apply(update);
        Some(row)
    }

    fn put(&mut self, record: Record<F>) -> Record<F> {
        self.rows.insert(record.surrogate_key(), record.clone());
        record
    }
}

impl Table<UserFields> {
    fn email_taken(&self, fields: &UserFields, except: Option<SurrogateKey>) -> bool {
        self.rows
            .values()
            .any(|row| Some(row.surrogate_key()) != except && row.fields().email == fields.email)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewRecord<UserFields>) -> Result<User, UserPersistenceError> {
        let mut table = self.table.lock().await;
        if table.email_taken(user.fields(), None) {
            return Err(UserPersistenceError::duplicate_email(
                user.fields().email.as_str(),
            ));
        }
        Ok(table.insert(user.clone()))
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.table.lock().await.find(external_id))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.table.lock().await.list())
    }

    async fn apply_update(
        &self,
        key: SurrogateKey,
        update: Update<UserFields>,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut table = self.table.lock().await;
        let Some(user) = table.merged(key, update) else {
            return Ok(None);
        };
        if table.email_taken(user.fields(), Some(key)) {
            return Err(UserPersistenceError::duplicate_email(
                user.fields().email.as_str(),
            ));
        }
        Ok(Some(table.put(user)))
    }

    async fn delete(&self, key: SurrogateKey) -> Result<bool, UserPersistenceError> {
        Ok(self.table.lock().await.delete(key))
    }
}

/// In-memory task store.
pub struct InMemoryTaskRepository {
    table: Mutex<Table<TaskFields>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewRecord<TaskFields>) -> Result<Task, TaskPersistenceError> {
        Ok(self.table.lock().await.insert(task.clone()))
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        Ok(self.table.lock().await.find(external_id))
    }

    async fn list(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        Ok(self.table.lock().await.list())
    }

    async fn apply_update(
        &self,
        key: SurrogateKey,
        update: Update<TaskFields>,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut table = self.table.lock().await;
        Ok(table.merged(key, update).map(|task| table.put(task)))
    }

    async fn delete(&self, key: SurrogateKey) -> Result<bool, TaskPersistenceError> {
        Ok(self.table.lock().await.delete(key))
    }
}
