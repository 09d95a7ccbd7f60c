mod appointment;
mod calendar;
pub mod extract;
mod fallback;
pub mod response;
mod root;
mod user;

use salvo::Router;

use crate::middleware::request_log::RequestLogMiddleware;

// Re-export route constants from core
pub use calendar_core::constants::{
    APPOINTMENT_ROUTE_PREFIX, CALENDAR_ROUTE_PREFIX, USER_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router with every entity's routes.
///
/// Requests that match no route fall through to a JSON 404.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .hoop(RequestLogMiddleware)
        .push(root::routes())
        .push(user::routes())
        .push(calendar::routes())
        .push(appointment::routes())
        .push(Router::with_path("{**rest}").goal(fallback::not_found))
}
