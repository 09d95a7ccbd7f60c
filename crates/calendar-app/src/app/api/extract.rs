//! Request parsing shared by the handlers.

use salvo::{Depot, Request};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use calendar_core::id::parse_id;
use calendar_service::Services;

use super::response::ApiError;
use crate::services_handler::get_services_from_depot;

/// ## Summary
/// Reads the path parameter `name` as a UUID.
///
/// ## Errors
/// Returns a 400 `invalid uuid` error if the segment is missing or malformed.
pub fn path_id(req: &Request, name: &str) -> Result<Uuid, ApiError> {
    let raw = req.param::<String>(name).unwrap_or_default();
    parse_id(&raw).map_err(|err| {
        tracing::info!(id = %raw, error = %err, "received invalid uuid");
        ApiError::bad_request("invalid uuid")
    })
}

/// ## Summary
/// Reads the whole body and decodes it as JSON.
///
/// ## Errors
/// Returns 400 `invalid request body` if the body cannot be read and 400
/// `invalid json body` if it does not decode into `T`.
pub async fn json_body<T>(req: &mut Request) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let path = req.uri().path().to_string();
    let bytes = req.payload().await.map_err(|err| {
        tracing::info!(error = %err, path = %path, "invalid request body");
        ApiError::bad_request("invalid request body")
    })?;

    serde_json::from_slice(bytes).map_err(|err| {
        tracing::info!(error = %err, path = %path, "invalid json body");
        ApiError::bad_request("invalid json body")
    })
}

/// ## Summary
/// Retrieves the service bundle, as a 500 error if it was never injected.
///
/// ## Errors
/// Returns an internal error if no services are in the depot.
pub fn services(depot: &Depot) -> Result<Services, ApiError> {
    get_services_from_depot(depot).map_err(|err| {
        tracing::error!(error = %err, "Failed to get services from depot");
        ApiError::internal("services unavailable")
    })
}
