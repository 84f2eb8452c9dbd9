//! Internal Diesel row models.
//!
//! These structs mirror the table layout and never leave the persistence
//! module; repositories convert them to and from domain records.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{tasks, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub uuid: Uuid,
    pub name: &'a str,
    pub email: &'a str,
}

/// Changeset overwriting every mutable user column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Row struct for reading from the tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: i64,
    pub uuid: Uuid,
    pub assignee_uuid: Option<Uuid>,
    pub description: String,
}

/// Insertable struct for creating new task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub uuid: Uuid,
    pub assignee_uuid: Option<Uuid>,
    pub description: &'a str,
}

/// Changeset overwriting every mutable task column.
///
/// A `None` assignee is written as `NULL` so a full replace can clear it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TaskUpdate<'a> {
    pub assignee_uuid: Option<Uuid>,
    pub description: &'a str,
}
