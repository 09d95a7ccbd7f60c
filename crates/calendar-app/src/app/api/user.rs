use salvo::{Depot, Request, Response, Router, handler, http::StatusCode};

use calendar_core::constants::USER_ROUTE_COMPONENT;
use calendar_core::model::User;

use super::extract::{json_body, path_id, services};
use super::response::{ApiError, CreatedResponse, DeletedResponse, render_json};

/// ## Summary
/// POST /user - Creates a user from the JSON body.
///
/// ## Errors
/// 400 for an unreadable or malformed body, 409 if validation fails or the
/// first/last name pair is taken.
#[handler]
#[tracing::instrument(skip_all)]
async fn create_user(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let user: User = match json_body(req).await {
        Ok(user) => user,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.users.create(user).await {
        Ok(created) => render_json(
            res,
            StatusCode::CREATED,
            CreatedResponse {
                message: "user created".to_string(),
                created_id: created.id,
            },
        ),
        Err(err) => {
            tracing::info!(error = %err, "unable to create user");
            ApiError::from_service("unable to create user", &err, StatusCode::CONFLICT).render(res);
        }
    }
}

/// ## Summary
/// GET /user/{id} - Returns the user with the ids of the appointments they attend.
#[handler]
#[tracing::instrument(skip_all, fields(id = ?req.param::<String>("id")))]
async fn read_user(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.users.read(id).await {
        Ok(user) => render_json(res, StatusCode::OK, user),
        Err(err) => {
            tracing::info!(error = %err, "unable to get user");
            ApiError::from_service("unable to get user", &err, StatusCode::NOT_FOUND).render(res);
        }
    }
}

/// ## Summary
/// POST /user/{id} - Replaces the user's names and email.
///
/// The id in the path wins over any id in the body.
#[handler]
#[tracing::instrument(skip_all, fields(id = ?req.param::<String>("id")))]
async fn update_user(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let mut user: User = match json_body(req).await {
        Ok(user) => user,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    user.id = id;
    match services.users.update(user).await {
        Ok(updated) => render_json(res, StatusCode::OK, updated),
        Err(err) => {
            tracing::info!(error = %err, "unable to update user");
            ApiError::from_service("unable to update user", &err, StatusCode::CONFLICT).render(res);
        }
    }
}

/// ## Summary
/// DELETE /user/{id} - Deletes the user with their calendars and attendances.
#[handler]
#[tracing::instrument(skip_all, fields(id = ?req.param::<String>("id")))]
async fn delete_user(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match path_id(req, "id") {
        Ok(id) => id,
        Err(err) => return err.render(res),
    };
    let services = match services(depot) {
        Ok(s) => s,
        Err(err) => return err.render(res),
    };

    match services.users.delete(id).await {
        Ok(deleted_id) => render_json(
            res,
            StatusCode::ACCEPTED,
            DeletedResponse {
                message: "deleted".to_string(),
                deleted_id,
            },
        ),
        Err(err) => {
            tracing::info!(error = %err, "unable to delete user");
            ApiError::from_service("unable to delete user", &err, StatusCode::NOT_FOUND).render(res);
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(USER_ROUTE_COMPONENT).post(create_user).push(
        Router::with_path("{id}")
            .get(read_user)
            .post(update_user)
            .delete(delete_user),
    )
}
