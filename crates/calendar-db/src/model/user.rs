use diesel::{pg::Pg, prelude::*};

use calendar_core::model::User;

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(Pg))]
pub struct UserRow {
    pub id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Insert struct for users. A `None` id lets the database generate one.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::users)]
pub struct NewUser<'a> {
    pub id: Option<uuid::Uuid>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

/// Scalar fields written by an update. Associations are never part of it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::users)]
pub struct UserChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a User> for NewUser<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: (!user.id.is_nil()).then_some(user.id),
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
        }
    }
}

impl<'a> From<&'a User> for UserChangeset<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            appointments: Vec::new(),
        }
    }
}
