//! Query composition per table.
//!
//! ## Summary
//! Each module exposes boxed query builders (`all`, `by_id`, ...) and async
//! operations over a pooled connection returning `diesel::QueryResult`.
//! Callers decide transaction boundaries.

pub mod appointment;
pub mod attendee;
pub mod calendar;
pub mod user;
