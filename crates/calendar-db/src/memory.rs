//! In-memory implementation of the repository traits.
//!
//! ## Summary
//! [`MemoryStore`] keeps rows in plain vectors behind a mutex and enforces the
//! same primary keys, unique indexes, foreign keys and cascades as the
//! migrations, reporting violations with the messages PostgreSQL would use.
//! Rows are kept in insertion order, which stands in for `created_at`
//! ordering.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use calendar_core::model::time::to_stored_precision;
use calendar_core::model::{Appointment, Calendar, User};

use crate::db::constraint;
use crate::error::{DbError, DbResult, IntegrityKind};
use crate::model::appointment::{AppointmentChangeset, AppointmentRow, NewAppointment};
use crate::model::attendee::Attendee;
use crate::model::calendar::CalendarRow;
use crate::model::user::UserRow;
use crate::repository::{AppointmentRepository, CalendarRepository, UserRepository};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRow>,
    calendars: Vec<CalendarRow>,
    appointments: Vec<AppointmentRow>,
    attendees: Vec<Attendee>,
}

/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the tables and recovers from poisoning.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.tables.clear_poison();
                poisoned.into_inner()
            }
        }
    }
}

fn unique(constraint: &str) -> DbError {
    DbError::integrity(IntegrityKind::Unique, constraint::unique_violation(constraint))
}

fn foreign_key(table: &str, constraint: &str) -> DbError {
    DbError::integrity(
        IntegrityKind::ForeignKey,
        constraint::foreign_key_violation(table, constraint),
    )
}

fn time_range(table: &str) -> DbError {
    DbError::integrity(
        IntegrityKind::Check,
        constraint::check_violation(table, constraint::APPOINTMENT_TIME_RANGE_CHECK),
    )
}

/// The current time at stored precision.
fn stored_now() -> DateTime<Utc> {
    to_stored_precision(Utc::now())
}

fn time_range_holds(
    whole_day: bool,
    start_at: DateTime<Utc>,
    end_at: Option<DateTime<Utc>>,
) -> bool {
    match end_at {
        None => whole_day,
        Some(end_at) => !whole_day && end_at > start_at,
    }
}

fn id_or_generate(id: Uuid) -> Uuid {
    if id.is_nil() { Uuid::new_v4() } else { id }
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn calendar_exists(&self, id: Uuid) -> bool {
        self.calendars.iter().any(|c| c.id == id)
    }

    fn appointment_exists(&self, id: Uuid) -> bool {
        self.appointments.iter().any(|a| a.id == id)
    }

    fn user_name_taken(&self, first_name: &str, last_name: &str, except: Option<Uuid>) -> bool {
        self.users.iter().any(|u| {
            Some(u.id) != except && u.first_name == first_name && u.last_name == last_name
        })
    }

    fn calendar_name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        self.calendars
            .iter()
            .any(|c| Some(c.id) != except && c.name == name)
    }

    fn subject_taken(&self, calendar_id: Uuid, subject: &str, except: Option<Uuid>) -> bool {
        self.appointments
            .iter()
            .any(|a| Some(a.id) != except && a.calendar_id == calendar_id && a.subject == subject)
    }

    fn user(&self, row: &UserRow) -> User {
        let appointments = self
            .appointments
            .iter()
            .filter(|a| {
                self.attendees
                    .iter()
                    .any(|link| link.appointment_id == a.id && link.user_id == row.id)
            })
            .map(|a| a.id)
            .collect();
        User {
            appointments,
            ..User::from(row.clone())
        }
    }

    fn attendees_of(&self, appointment_id: Uuid) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| {
                self.attendees
                    .iter()
                    .any(|link| link.appointment_id == appointment_id && link.user_id == u.id)
            })
            .cloned()
            .map(User::from)
            .collect()
    }

    fn appointment(&self, row: &AppointmentRow) -> Appointment {
        Appointment {
            attendees: self.attendees_of(row.id),
            ..Appointment::from(row.clone())
        }
    }

    fn calendar(&self, row: &CalendarRow) -> Calendar {
        let appointments = self
            .appointments
            .iter()
            .filter(|a| a.calendar_id == row.id)
            .cloned()
            .map(Appointment::from)
            .collect();
        Calendar {
            appointments,
            ..Calendar::from(row.clone())
        }
    }

    fn delete_appointments(&mut self, ids: &[Uuid]) {
        self.attendees
            .retain(|link| !ids.contains(&link.appointment_id));
        self.appointments.retain(|a| !ids.contains(&a.id));
    }

    fn delete_calendars(&mut self, ids: &[Uuid]) {
        let appointment_ids: Vec<Uuid> = self
            .appointments
            .iter()
            .filter(|a| ids.contains(&a.calendar_id))
            .map(|a| a.id)
            .collect();
        self.delete_appointments(&appointment_ids);
        self.calendars.retain(|c| !ids.contains(&c.id));
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> DbResult<User> {
        let mut tables = self.lock();
        let id = id_or_generate(user.id);
        if tables.user_exists(id) {
            return Err(unique(constraint::USERS_PKEY));
        }
        if tables.user_name_taken(&user.first_name, &user.last_name, None) {
            return Err(unique(constraint::USER_NAME_UNIQUE));
        }

        let now = stored_now();
        let row = UserRow {
            id,
            created_at: now,
            updated_at: now,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        };
        tables.users.push(row.clone());
        Ok(User::from(row))
    }

    async fn find(&self, id: Uuid) -> DbResult<Option<User>> {
        let tables = self.lock();
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|row| tables.user(row)))
    }

    async fn update(&self, user: &User) -> DbResult<Option<User>> {
        let mut tables = self.lock();
        if !tables.user_exists(user.id) {
            return Ok(None);
        }
        if tables.user_name_taken(&user.first_name, &user.last_name, Some(user.id)) {
            return Err(unique(constraint::USER_NAME_UNIQUE));
        }

        let Some(row) = tables.users.iter_mut().find(|u| u.id == user.id) else {
            return Ok(None);
        };
        row.first_name.clone_from(&user.first_name);
        row.last_name.clone_from(&user.last_name);
        row.email.clone_from(&user.email);
        row.updated_at = stored_now();
        let row = row.clone();

        Ok(Some(tables.user(&row)))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut tables = self.lock();
        if !tables.user_exists(id) {
            return Ok(false);
        }

        let calendar_ids: Vec<Uuid> = tables
            .calendars
            .iter()
            .filter(|c| c.user_id == id)
            .map(|c| c.id)
            .collect();
        tables.delete_calendars(&calendar_ids);
        tables.attendees.retain(|link| link.user_id != id);
        tables.users.retain(|u| u.id != id);
        Ok(true)
    }
}

#[async_trait]
impl CalendarRepository for MemoryStore {
    async fn insert(&self, calendar: &Calendar) -> DbResult<Calendar> {
        let mut tables = self.lock();
        let id = id_or_generate(calendar.id);
        if tables.calendar_exists(id) {
            return Err(unique(constraint::CALENDARS_PKEY));
        }
        if tables.calendar_name_taken(&calendar.name, None) {
            return Err(unique(constraint::CALENDAR_NAME_UNIQUE));
        }
        if !tables.user_exists(calendar.user_id) {
            return Err(foreign_key("calendars", constraint::CALENDAR_USER_FKEY));
        }

        let now = stored_now();
        let row = CalendarRow {
            id,
            created_at: now,
            updated_at: now,
            name: calendar.name.clone(),
            user_id: calendar.user_id,
        };
        tables.calendars.push(row.clone());
        Ok(Calendar::from(row))
    }

    async fn find(&self, id: Uuid) -> DbResult<Option<Calendar>> {
        let tables = self.lock();
        Ok(tables
            .calendars
            .iter()
            .find(|c| c.id == id)
            .map(|row| tables.calendar(row)))
    }

    async fn update(&self, calendar: &Calendar) -> DbResult<Option<Calendar>> {
        let mut tables = self.lock();
        if !tables.calendar_exists(calendar.id) {
            return Ok(None);
        }
        if tables.calendar_name_taken(&calendar.name, Some(calendar.id)) {
            return Err(unique(constraint::CALENDAR_NAME_UNIQUE));
        }

        let Some(row) = tables.calendars.iter_mut().find(|c| c.id == calendar.id) else {
            return Ok(None);
        };
        row.name.clone_from(&calendar.name);
        row.updated_at = stored_now();
        let row = row.clone();

        Ok(Some(tables.calendar(&row)))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut tables = self.lock();
        if !tables.calendar_exists(id) {
            return Ok(false);
        }
        tables.delete_calendars(&[id]);
        Ok(true)
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn insert(&self, appointment: &Appointment) -> DbResult<Appointment> {
        let new = NewAppointment::try_from(appointment)?;

        let mut tables = self.lock();
        let id = id_or_generate(appointment.id);
        if tables.appointment_exists(id) {
            return Err(unique(constraint::APPOINTMENTS_PKEY));
        }
        if tables.subject_taken(new.calendar_id, new.subject, None) {
            return Err(unique(constraint::APPOINTMENT_SUBJECT_UNIQUE));
        }
        if !tables.calendar_exists(new.calendar_id) {
            return Err(foreign_key(
                "appointments",
                constraint::APPOINTMENT_CALENDAR_FKEY,
            ));
        }
        if !time_range_holds(new.whole_day, new.start_at, new.end_at) {
            return Err(time_range("appointments"));
        }

        let now = stored_now();
        let row = AppointmentRow {
            id,
            created_at: now,
            updated_at: now,
            subject: new.subject.to_string(),
            description: new.description.map(str::to_string),
            whole_day: new.whole_day,
            start_at: new.start_at,
            end_at: new.end_at,
            calendar_id: new.calendar_id,
        };
        tables.appointments.push(row.clone());
        Ok(Appointment::from(row))
    }

    async fn find(&self, id: Uuid) -> DbResult<Option<Appointment>> {
        let tables = self.lock();
        Ok(tables
            .appointments
            .iter()
            .find(|a| a.id == id)
            .map(|row| tables.appointment(row)))
    }

    async fn update(&self, appointment: &Appointment) -> DbResult<Option<Appointment>> {
        let changes = AppointmentChangeset::try_from(appointment)?;

        let mut tables = self.lock();
        let Some(current) = tables.appointments.iter().find(|a| a.id == appointment.id) else {
            return Ok(None);
        };
        let calendar_id = changes.calendar_id.unwrap_or(current.calendar_id);
        if tables.subject_taken(calendar_id, changes.subject, Some(appointment.id)) {
            return Err(unique(constraint::APPOINTMENT_SUBJECT_UNIQUE));
        }
        if !tables.calendar_exists(calendar_id) {
            return Err(foreign_key(
                "appointments",
                constraint::APPOINTMENT_CALENDAR_FKEY,
            ));
        }

        let end_at = changes.end_at.unwrap_or(current.end_at);
        if !time_range_holds(changes.whole_day, changes.start_at, end_at) {
            return Err(time_range("appointments"));
        }

        let Some(row) = tables
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
        else {
            return Ok(None);
        };
        changes.subject.clone_into(&mut row.subject);
        if let Some(description) = changes.description {
            row.description = Some(description.to_string());
        }
        row.whole_day = changes.whole_day;
        row.start_at = changes.start_at;
        if let Some(end_at) = changes.end_at {
            row.end_at = end_at;
        }
        row.calendar_id = calendar_id;
        row.updated_at = stored_now();
        let row = row.clone();

        Ok(Some(tables.appointment(&row)))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut tables = self.lock();
        if !tables.appointment_exists(id) {
            return Ok(false);
        }
        tables.delete_appointments(&[id]);
        Ok(true)
    }

    async fn add_attendees(&self, appointment_id: Uuid, user_ids: &[Uuid]) -> DbResult<Vec<User>> {
        let mut tables = self.lock();
        if user_ids.is_empty() {
            return Ok(tables.attendees_of(appointment_id));
        }
        if !tables.appointment_exists(appointment_id) {
            return Err(foreign_key(
                "users_appointments",
                constraint::ATTENDEE_APPOINTMENT_FKEY,
            ));
        }
        if user_ids.iter().any(|&id| !tables.user_exists(id)) {
            return Err(foreign_key(
                "users_appointments",
                constraint::ATTENDEE_USER_FKEY,
            ));
        }

        for &user_id in user_ids {
            let link = Attendee {
                appointment_id,
                user_id,
            };
            if !tables.attendees.contains(&link) {
                tables.attendees.push(link);
            }
        }
        Ok(tables.attendees_of(appointment_id))
    }

    async fn remove_attendees(
        &self,
        appointment_id: Uuid,
        user_ids: &[Uuid],
    ) -> DbResult<Vec<User>> {
        let mut tables = self.lock();
        tables.attendees.retain(|link| {
            link.appointment_id != appointment_id || !user_ids.contains(&link.user_id)
        });
        Ok(tables.attendees_of(appointment_id))
    }
}
