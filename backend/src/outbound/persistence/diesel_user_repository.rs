//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, ExternalId, NewRecord, SurrogateKey, Update, User, UserFields};

use super::diesel_error_mapping::{
    USERS_EMAIL_CONSTRAINT, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(error: diesel::result::Error, email: &Email) -> UserPersistenceError {
    if is_unique_violation(&error, USERS_EMAIL_CONSTRAINT) {
        return UserPersistenceError::duplicate_email(email.as_str());
    }
    map_read_error(error)
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        uuid,
        name,
        email,
    } = row;
    let email = Email::new(email)
        .map_err(|err| UserPersistenceError::query(format!("stored user {uuid}: {err}")))?;
    Ok(User::new(
        SurrogateKey::new(id),
        ExternalId::from_uuid(uuid),
        UserFields { name, email },
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewRecord<UserFields>) -> Result<User, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;
        let fields = user.fields();
        let new_row = NewUserRow {
            uuid: *user.external_id().as_uuid(),
            name: &fields.name,
            email: fields.email.as_str(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &fields.email))?;
        row_to_user(row)
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::uuid.eq(external_id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn apply_update(
        &self,
        key: SurrogateKey,
        update: Update<UserFields>,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;
        // Only an email carried by the update can collide with another row.
        let incoming_email = match &update {
            Update::Replace(fields) => Some(fields.email.clone()),
            Update::Merge(patch) => patch.email.clone(),
        };

        let row = conn
            .transaction(|conn| {
                async move {
                    let Some(row) = users::table
                        .find(key.get())
                        .select(UserRow::as_select())
                        .for_update()
                        .first::<UserRow>(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };
                    let mut user = row_to_user(row)
                        .map_err(|err| diesel::result::Error::DeserializationError(Box::new(err)))?;
                    user.apply(update);
                    let fields = user.fields();
                    let changes = UserUpdate {
                        name: &fields.name,
                        email: fields.email.as_str(),
                    };

                    diesel::update(users::table.find(key.get()))
                        .set(&changes)
                        .returning(UserRow::as_returning())
                        .get_result::<UserRow>(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| match &incoming_email {
                Some(email) => map_write_error(err, email),
                None => map_read_error(err),
            })?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, key: SurrogateKey) -> Result<bool, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let removed = diesel::delete(users::table.find(key.get()))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn row_conversion_keeps_both_identifiers() {
        let uuid = Uuid::new_v4();
        let user = row_to_user(UserRow {
            id: 42,
            uuid,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        })
        .expect("valid row");

        assert_eq!(user.surrogate_key(), SurrogateKey::new(42));
        assert_eq!(user.external_id(), ExternalId::from_uuid(uuid));
        assert_eq!(user.fields().email.as_str(), "ada@example.com");
    }

    #[rstest]
    fn corrupt_stored_email_is_a_query_error() {
        let err = row_to_user(UserRow {
            id: 1,
            uuid: Uuid::new_v4(),
            name: "Ada".into(),
            email: "not-an-email".into(),
        })
        .expect_err("invalid email");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
