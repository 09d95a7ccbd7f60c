//! PostgreSQL implementation of the repository traits.

use async_trait::async_trait;
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use calendar_core::model::{Appointment, Calendar, User};

use crate::db::DbProvider;
use crate::db::connection::DbPool;
use crate::db::query;
use crate::error::{DbError, DbResult};
use crate::model::appointment::{AppointmentChangeset, NewAppointment};
use crate::model::attendee::Attendee;
use crate::model::calendar::{CalendarChangeset, NewCalendar};
use crate::model::user::{NewUser, UserChangeset};
use crate::repository::{AppointmentRepository, CalendarRepository, UserRepository};

/// Repositories backed by a shared connection pool.
///
/// Every insert, update and attendee change runs in its own transaction.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore")
            .field("pool", &self.pool.state())
            .finish()
    }
}

#[async_trait]
impl UserRepository for PgStore {
    #[tracing::instrument(skip(self, user), fields(first_name = %user.first_name, last_name = %user.last_name))]
    async fn insert(&self, user: &User) -> DbResult<User> {
        let mut conn = self.pool.get_connection().await?;
        let row = conn
            .transaction::<_, DbError, _>(|tx| {
                async move { Ok(query::user::insert(tx, &NewUser::from(user)).await?) }
                    .scope_boxed()
            })
            .await?;

        tracing::debug!(user_id = %row.id, "User inserted");
        Ok(User::from(row))
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: Uuid) -> DbResult<Option<User>> {
        let mut conn = self.pool.get_connection().await?;
        let Some(row) = query::user::find(&mut conn, id).await? else {
            return Ok(None);
        };

        let appointments = query::user::appointment_ids(&mut conn, id).await?;
        Ok(Some(User {
            appointments,
            ..User::from(row)
        }))
    }

    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> DbResult<Option<User>> {
        let mut conn = self.pool.get_connection().await?;
        conn.transaction::<_, DbError, _>(|tx| {
            async move {
                let Some(row) =
                    query::user::update(tx, user.id, &UserChangeset::from(user)).await?
                else {
                    return Ok(None);
                };
                let appointments = query::user::appointment_ids(tx, row.id).await?;
                Ok(Some(User {
                    appointments,
                    ..User::from(row)
                }))
            }
            .scope_boxed()
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut conn = self.pool.get_connection().await?;
        Ok(query::user::delete(&mut conn, id).await?)
    }
}

#[async_trait]
impl CalendarRepository for PgStore {
    #[tracing::instrument(skip(self, calendar), fields(name = %calendar.name, user_id = %calendar.user_id))]
    async fn insert(&self, calendar: &Calendar) -> DbResult<Calendar> {
        let mut conn = self.pool.get_connection().await?;
        let row = conn
            .transaction::<_, DbError, _>(|tx| {
                async move { Ok(query::calendar::insert(tx, &NewCalendar::from(calendar)).await?) }
                    .scope_boxed()
            })
            .await?;

        tracing::debug!(calendar_id = %row.id, "Calendar inserted");
        Ok(Calendar::from(row))
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: Uuid) -> DbResult<Option<Calendar>> {
        let mut conn = self.pool.get_connection().await?;
        let Some(row) = query::calendar::find(&mut conn, id).await? else {
            return Ok(None);
        };

        let appointments = query::appointment::for_calendar(&mut conn, &row)
            .await?
            .into_iter()
            .map(Appointment::from)
            .collect();
        Ok(Some(Calendar {
            appointments,
            ..Calendar::from(row)
        }))
    }

    #[tracing::instrument(skip(self, calendar), fields(calendar_id = %calendar.id))]
    async fn update(&self, calendar: &Calendar) -> DbResult<Option<Calendar>> {
        let mut conn = self.pool.get_connection().await?;
        conn.transaction::<_, DbError, _>(|tx| {
            async move {
                let Some(row) =
                    query::calendar::update(tx, calendar.id, &CalendarChangeset::from(calendar))
                        .await?
                else {
                    return Ok(None);
                };
                let appointments = query::appointment::for_calendar(tx, &row)
                    .await?
                    .into_iter()
                    .map(Appointment::from)
                    .collect();
                Ok(Some(Calendar {
                    appointments,
                    ..Calendar::from(row)
                }))
            }
            .scope_boxed()
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut conn = self.pool.get_connection().await?;
        Ok(query::calendar::delete(&mut conn, id).await?)
    }
}

#[async_trait]
impl AppointmentRepository for PgStore {
    #[tracing::instrument(skip(self, appointment), fields(subject = %appointment.subject, calendar_id = %appointment.calendar_id))]
    async fn insert(&self, appointment: &Appointment) -> DbResult<Appointment> {
        let new_appointment = NewAppointment::try_from(appointment)?;

        let mut conn = self.pool.get_connection().await?;
        let row = conn
            .transaction::<_, DbError, _>(|tx| {
                async move { Ok(query::appointment::insert(tx, &new_appointment).await?) }
                    .scope_boxed()
            })
            .await?;

        tracing::debug!(appointment_id = %row.id, "Appointment inserted");
        Ok(Appointment::from(row))
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: Uuid) -> DbResult<Option<Appointment>> {
        let mut conn = self.pool.get_connection().await?;
        let Some(row) = query::appointment::find(&mut conn, id).await? else {
            return Ok(None);
        };

        let attendees = query::attendee::users_for_appointment(&mut conn, id)
            .await?
            .into_iter()
            .map(User::from)
            .collect();
        Ok(Some(Appointment {
            attendees,
            ..Appointment::from(row)
        }))
    }

    #[tracing::instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn update(&self, appointment: &Appointment) -> DbResult<Option<Appointment>> {
        let changes = AppointmentChangeset::try_from(appointment)?;

        let mut conn = self.pool.get_connection().await?;
        conn.transaction::<_, DbError, _>(|tx| {
            async move {
                let Some(row) = query::appointment::update(tx, appointment.id, &changes).await?
                else {
                    return Ok(None);
                };
                let attendees = query::attendee::users_for_appointment(tx, row.id)
                    .await?
                    .into_iter()
                    .map(User::from)
                    .collect();
                Ok(Some(Appointment {
                    attendees,
                    ..Appointment::from(row)
                }))
            }
            .scope_boxed()
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut conn = self.pool.get_connection().await?;
        Ok(query::appointment::delete(&mut conn, id).await?)
    }

    #[tracing::instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn add_attendees(&self, appointment_id: Uuid, user_ids: &[Uuid]) -> DbResult<Vec<User>> {
        let links: Vec<Attendee> = user_ids
            .iter()
            .map(|&user_id| Attendee {
                appointment_id,
                user_id,
            })
            .collect();

        let mut conn = self.pool.get_connection().await?;
        let rows = conn
            .transaction::<_, DbError, _>(|tx| {
                async move {
                    let added = query::attendee::insert_batch(tx, &links).await?;
                    tracing::debug!(added, "Attendees linked");
                    Ok(query::attendee::users_for_appointment(tx, appointment_id).await?)
                }
                .scope_boxed()
            })
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[tracing::instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn remove_attendees(
        &self,
        appointment_id: Uuid,
        user_ids: &[Uuid],
    ) -> DbResult<Vec<User>> {
        let mut conn = self.pool.get_connection().await?;
        let rows = conn
            .transaction::<_, DbError, _>(|tx| {
                async move {
                    let removed =
                        query::attendee::delete_batch(tx, appointment_id, user_ids).await?;
                    tracing::debug!(removed, "Attendees unlinked");
                    Ok(query::attendee::users_for_appointment(tx, appointment_id).await?)
                }
                .scope_boxed()
            })
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
