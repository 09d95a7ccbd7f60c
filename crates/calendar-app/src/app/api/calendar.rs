use salvo::{Depot, Request, Response, Router, handler, http::StatusCode};

use calendar_core::constants::{CALENDAR_ROUTE_COMPONENT, USER_ROUTE_COMPONENT};
use calendar_core::model::Calendar;

use super::extract::{json_body, path_id, services};
use super::response::{ApiError, CreatedResponse, DeletedResponse, render_json};

/// ## Summary
/// POST /user/{user_id}/calendar - Creates a calendar owned by the user.
///
/// ## Errors
/// 400 for a bad id or body, 409 if validation fails, the name is taken or
/// the user does not exist.
#[handler]
#[tracing::instrument(skip_all, fields(user_id = ?req.param::<String>("user_id")))]
async fn create_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let user_id = match path_id(req, "user_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let mut calendar: Calendar = match json_body(req).await {
        Ok(calendar) => calendar,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    calendar.user_id = user_id;
    match services.calendars.create(calendar).await {
        Ok(created) => render_json(
            res,
            StatusCode::CREATED,
            CreatedResponse {
                message: "calendar created".to_string(),
                created_id: created.id,
            },
        ),
        Err(err) => {
            tracing::info!(error = %err, "unable to create calendar");
            ApiError::from_service("unable to create calendar", &err, StatusCode::CONFLICT)
                .render(res);
        }
    }
}

/// ## Summary
/// GET /calendar/{calendar_id} - Returns the calendar with its appointments.
#[handler]
#[tracing::instrument(skip_all, fields(calendar_id = ?req.param::<String>("calendar_id")))]
async fn read_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "calendar_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.calendars.read(id).await {
        Ok(calendar) => render_json(res, StatusCode::OK, calendar),
        Err(err) => {
            tracing::info!(error = %err, "unable to get calendar");
            ApiError::from_service("unable to get calendar", &err, StatusCode::NOT_FOUND)
                .render(res);
        }
    }
}

/// ## Summary
/// POST /calendar/{calendar_id} - Renames the calendar.
#[handler]
#[tracing::instrument(skip_all, fields(calendar_id = ?req.param::<String>("calendar_id")))]
async fn update_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "calendar_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let mut calendar: Calendar = match json_body(req).await {
        Ok(calendar) => calendar,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    calendar.id = id;
    match services.calendars.update(calendar).await {
        Ok(updated) => render_json(res, StatusCode::OK, updated),
        Err(err) => {
            tracing::info!(error = %err, "unable to update calendar");
            ApiError::from_service("unable to update calendar", &err, StatusCode::CONFLICT)
                .render(res);
        }
    }
}

/// ## Summary
/// DELETE /calendar/{calendar_id} - Deletes the calendar and its appointments.
#[handler]
#[tracing::instrument(skip_all, fields(calendar_id = ?req.param::<String>("calendar_id")))]
async fn delete_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "calendar_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.calendars.delete(id).await {
        Ok(deleted_id) => render_json(
            res,
            StatusCode::ACCEPTED,
            DeletedResponse {
                message: "calendar deleted".to_string(),
                deleted_id,
            },
        ),
        Err(err) => {
            tracing::info!(error = %err, "unable to delete calendar");
            ApiError::from_service("unable to delete calendar", &err, StatusCode::NOT_FOUND)
                .render(res);
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(
            Router::with_path(USER_ROUTE_COMPONENT)
                .push(Router::with_path("{user_id}").push(
                    Router::with_path(CALENDAR_ROUTE_COMPONENT).post(create_calendar),
                )),
        )
        .push(
            Router::with_path(CALENDAR_ROUTE_COMPONENT).push(
                Router::with_path("{calendar_id}")
                    .get(read_calendar)
                    .post(update_calendar)
                    .delete(delete_calendar),
            ),
        )
}
