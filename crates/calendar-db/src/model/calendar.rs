use diesel::{pg::Pg, prelude::*};

use calendar_core::model::Calendar;

use crate::db::schema;
use crate::model::user::UserRow;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = schema::calendars)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(UserRow, foreign_key = user_id))]
pub struct CalendarRow {
    pub id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub name: String,
    pub user_id: uuid::Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::calendars)]
pub struct NewCalendar<'a> {
    pub id: Option<uuid::Uuid>,
    pub name: &'a str,
    pub user_id: uuid::Uuid,
}

/// Only the name of a calendar can change; the owner is fixed at creation.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::calendars)]
pub struct CalendarChangeset<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a Calendar> for NewCalendar<'a> {
    fn from(calendar: &'a Calendar) -> Self {
        Self {
            id: (!calendar.id.is_nil()).then_some(calendar.id),
            name: &calendar.name,
            user_id: calendar.user_id,
        }
    }
}

impl<'a> From<&'a Calendar> for CalendarChangeset<'a> {
    fn from(calendar: &'a Calendar) -> Self {
        Self {
            name: &calendar.name,
        }
    }
}

impl From<CalendarRow> for Calendar {
    fn from(row: CalendarRow) -> Self {
        Self {
            id: row.id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
            name: row.name,
            user_id: row.user_id,
            appointments: Vec::new(),
        }
    }
}
