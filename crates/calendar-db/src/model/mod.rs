//! Row types mapping the diesel schema to and from the domain entities.

pub mod appointment;
pub mod attendee;
pub mod calendar;
pub mod user;
