use diesel::prelude::*;

use crate::db::schema;

/// One row of the `users_appointments` association table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::users_appointments)]
pub struct Attendee {
    pub appointment_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
}
