//! Application services for users, calendars and appointments.
//!
//! ## Summary
//! Each service validates its entity, checks identifiers and delegates to a
//! repository injected at construction. [`Services`] bundles the three over a
//! single store.

use std::sync::Arc;

use calendar_db::db::connection::DbPool;
use calendar_db::db::store::PgStore;
use calendar_db::memory::MemoryStore;
use calendar_db::repository::{AppointmentRepository, CalendarRepository, UserRepository};

pub mod appointment;
pub mod calendar;
pub mod error;
pub mod user;

pub use appointment::AppointmentService;
pub use calendar::CalendarService;
pub use user::UserService;

#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub calendars: CalendarService,
    pub appointments: AppointmentService,
}

impl Services {
    /// ## Summary
    /// Builds every service over the same store.
    #[must_use]
    pub fn new<S>(store: S) -> Self
    where
        S: UserRepository + CalendarRepository + AppointmentRepository + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: UserService::new(Arc::clone(&store) as Arc<dyn UserRepository>),
            calendars: CalendarService::new(Arc::clone(&store) as Arc<dyn CalendarRepository>),
            appointments: AppointmentService::new(store as Arc<dyn AppointmentRepository>),
        }
    }

    /// ## Summary
    /// Builds the services over PostgreSQL.
    #[must_use]
    pub fn postgres(pool: DbPool) -> Self {
        Self::new(PgStore::new(pool))
    }

    /// ## Summary
    /// Builds the services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
