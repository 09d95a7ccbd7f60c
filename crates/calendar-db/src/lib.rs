//! Persistence for users, calendars and appointments.
//!
//! ## Summary
//! The `db` module holds the diesel schema, the PostgreSQL pool and the
//! schema fixtures. `repository` defines one storage port per entity, with a
//! PostgreSQL implementation (`db::store::PgStore`) and an in-memory one
//! (`memory::MemoryStore`) that enforces the same constraints.

pub mod db;
pub mod error;
pub mod memory;
pub mod model;
pub mod repository;
