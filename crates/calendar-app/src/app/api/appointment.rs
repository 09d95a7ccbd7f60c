use salvo::{Depot, Request, Response, Router, handler, http::StatusCode};

use calendar_core::constants::{
    ADD_ATTENDEES_ROUTE_COMPONENT, APPOINTMENT_ROUTE_COMPONENT, CALENDAR_ROUTE_COMPONENT,
    REMOVE_ATTENDEES_ROUTE_COMPONENT,
};
use calendar_core::error::CoreError;
use calendar_core::model::Appointment;
use calendar_service::error::ServiceError;

use super::extract::{json_body, path_id, services};
use super::response::{ApiError, CreatedResponse, DeletedResponse, render_json};

/// Malformed attendee ids are the caller's fault; anything else means the
/// appointment or a user could not be found.
fn attendee_error(message: &str, err: &ServiceError) -> ApiError {
    let status = match err {
        ServiceError::CoreError(CoreError::InvalidIdentifier(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::NOT_FOUND,
    };
    ApiError::from_service(message, err, status)
}

/// ## Summary
/// POST /calendar/{calendar_id}/appointment - Creates an appointment in the calendar.
///
/// ## Errors
/// 400 for a bad id or body, 409 if validation fails, the subject is taken
/// in the calendar or the calendar does not exist.
#[handler]
#[tracing::instrument(skip_all, fields(calendar_id = ?req.param::<String>("calendar_id")))]
async fn create_appointment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let calendar_id = match path_id(req, "calendar_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let mut appointment: Appointment = match json_body(req).await {
        Ok(appointment) => appointment,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    appointment.calendar_id = calendar_id;
    match services.appointments.create(appointment).await {
        Ok(created) => render_json(
            res,
            StatusCode::CREATED,
            CreatedResponse {
                message: "appointment created".to_string(),
                created_id: created.id,
            },
        ),
        Err(err) => {
            tracing::info!(error = %err, "unable to create appointment");
            ApiError::from_service("unable to create appointment", &err, StatusCode::CONFLICT)
                .render(res);
        }
    }
}

/// ## Summary
/// GET /appointment/{appointment_id} - Returns the appointment with its attendees.
#[handler]
#[tracing::instrument(skip_all, fields(appointment_id = ?req.param::<String>("appointment_id")))]
async fn read_appointment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "appointment_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.appointments.read(id).await {
        Ok(appointment) => render_json(res, StatusCode::OK, appointment),
        Err(err) => {
            tracing::info!(error = %err, "unable to get appointment");
            ApiError::from_service("unable to get appointment", &err, StatusCode::NOT_FOUND)
                .render(res);
        }
    }
}

/// ## Summary
/// POST /appointment/{appointment_id} - Replaces the appointment's fields.
///
/// A missing `calendar_id` keeps the current calendar.
#[handler]
#[tracing::instrument(skip_all, fields(appointment_id = ?req.param::<String>("appointment_id")))]
async fn update_appointment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "appointment_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let mut appointment: Appointment = match json_body(req).await {
        Ok(appointment) => appointment,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    appointment.id = id;
    match services.appointments.update(appointment).await {
        Ok(updated) => render_json(res, StatusCode::OK, updated),
        Err(err) => {
            tracing::info!(error = %err, "unable to update appointment");
            ApiError::from_service("unable to update appointment", &err, StatusCode::CONFLICT)
                .render(res);
        }
    }
}

/// ## Summary
/// DELETE /appointment/{appointment_id} - Deletes the appointment.
#[handler]
#[tracing::instrument(skip_all, fields(appointment_id = ?req.param::<String>("appointment_id")))]
async fn delete_appointment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "appointment_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.appointments.delete(id).await {
        Ok(deleted_id) => render_json(
            res,
            StatusCode::ACCEPTED,
            DeletedResponse {
                message: "appointment deleted".to_string(),
                deleted_id,
            },
        ),
        Err(err) => {
            tracing::info!(error = %err, "unable to delete appointment");
            ApiError::from_service("unable to delete appointment", &err, StatusCode::NOT_FOUND)
                .render(res);
        }
    }
}

/// ## Summary
/// POST /appointment/{appointment_id}/add-attendees - Adds the users whose ids
/// are listed in the JSON array body.
///
/// ## Errors
/// 400 for a bad body or a malformed user id, 404 if the appointment or any
/// user does not exist.
#[handler]
#[tracing::instrument(skip_all, fields(appointment_id = ?req.param::<String>("appointment_id")))]
async fn add_attendees(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "appointment_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let user_ids: Vec<String> = match json_body(req).await {
        Ok(ids) => ids,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.appointments.add_attendees(id, &user_ids).await {
        Ok(appointment) => render_json(res, StatusCode::OK, appointment),
        Err(err) => {
            tracing::info!(error = %err, "unable to add attendees to appointment");
            attendee_error("unable to add attendees to appointment", &err).render(res);
        }
    }
}

/// ## Summary
/// POST /appointment/{appointment_id}/remove-attendees - Removes the listed
/// users. Users that were not attending are ignored.
#[handler]
#[tracing::instrument(skip_all, fields(appointment_id = ?req.param::<String>("appointment_id")))]
async fn remove_attendees(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "appointment_id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let user_ids: Vec<String> = match json_body(req).await {
        Ok(ids) => ids,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.appointments.remove_attendees(id, &user_ids).await {
        Ok(appointment) => render_json(res, StatusCode::OK, appointment),
        Err(err) => {
            tracing::info!(error = %err, "unable to remove attendees from appointment");
            attendee_error("unable to remove attendees from appointment", &err).render(res);
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(
            Router::with_path(CALENDAR_ROUTE_COMPONENT).push(
                Router::with_path("{calendar_id}")
                    .push(Router::with_path(APPOINTMENT_ROUTE_COMPONENT).post(create_appointment)),
            ),
        )
        .push(
            Router::with_path(APPOINTMENT_ROUTE_COMPONENT).push(
                Router::with_path("{appointment_id}")
                    .get(read_appointment)
                    .post(update_appointment)
                    .delete(delete_appointment)
                    .push(Router::with_path(ADD_ATTENDEES_ROUTE_COMPONENT).post(add_attendees))
                    .push(
                        Router::with_path(REMOVE_ATTENDEES_ROUTE_COMPONENT).post(remove_attendees),
                    ),
            ),
        )
}
