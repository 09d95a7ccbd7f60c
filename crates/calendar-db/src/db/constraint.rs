//! Names of the constraints declared in `migrations/`.
//!
//! The in-memory store reports violations with the same names PostgreSQL uses.

pub const USERS_PKEY: &str = "users_pkey";
pub const USER_NAME_UNIQUE: &str = "idx_user_first_last_name_unique";

pub const CALENDARS_PKEY: &str = "calendars_pkey";
pub const CALENDAR_NAME_UNIQUE: &str = "idx_calendar_name_unique";
pub const CALENDAR_USER_FKEY: &str = "calendars_user_id_fkey";

pub const APPOINTMENTS_PKEY: &str = "appointments_pkey";
pub const APPOINTMENT_SUBJECT_UNIQUE: &str = "idx_calendar_id_subject_unique";
pub const APPOINTMENT_CALENDAR_FKEY: &str = "appointments_calendar_id_fkey";
pub const APPOINTMENT_TIME_RANGE_CHECK: &str = "appointments_time_range_check";

pub const ATTENDEE_APPOINTMENT_FKEY: &str = "users_appointments_appointment_id_fkey";
pub const ATTENDEE_USER_FKEY: &str = "users_appointments_user_id_fkey";

/// ## Summary
/// Message PostgreSQL reports for a unique violation.
#[must_use]
pub fn unique_violation(constraint: &str) -> String {
    format!("duplicate key value violates unique constraint \"{constraint}\"")
}

/// ## Summary
/// Message PostgreSQL reports for a foreign-key violation on insert or update.
#[must_use]
pub fn foreign_key_violation(table: &str, constraint: &str) -> String {
    format!("insert or update on table \"{table}\" violates foreign key constraint \"{constraint}\"")
}

/// ## Summary
/// Message PostgreSQL reports for a check-constraint violation.
#[must_use]
pub fn check_violation(table: &str, constraint: &str) -> String {
    format!("new row for relation \"{table}\" violates check constraint \"{constraint}\"")
}
