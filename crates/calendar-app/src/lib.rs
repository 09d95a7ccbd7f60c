//! HTTP surface of the calendar backend.
//!
//! ## Summary
//! `app::api::routes` builds the salvo router. Handlers pull the
//! [`calendar_service::Services`] bundle injected by
//! [`services_handler::ServicesHandler`] out of the depot and translate
//! service results into JSON responses.

pub mod app;
pub mod error;
pub mod middleware;
pub mod services_handler;
