//! JSON bodies written by the handlers.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::Response;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use calendar_service::error::ServiceError;

/// Error body: `{"message", "status_code", "error"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub status_code: u16,
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>, error: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
            error: error.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "bad request", StatusCode::BAD_REQUEST)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, "resource not found", StatusCode::NOT_FOUND)
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(message, "method not implemented", StatusCode::NOT_IMPLEMENTED)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            message,
            "internal server error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }

    /// ## Summary
    /// Wraps a failed service call, carrying the service error text in `error`.
    pub fn from_service(message: impl Into<String>, err: &ServiceError, status: StatusCode) -> Self {
        Self::new(message, err.to_string(), status)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// ## Summary
    /// Writes this error as the response.
    pub fn render(self, res: &mut Response) {
        res.status_code(self.status());
        res.render(Json(self));
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "message: {}. status: {}. error: {}",
            self.message, self.status_code, self.error
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub created_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
    pub deleted_id: Uuid,
}

/// ## Summary
/// Writes `body` as JSON with the given status.
pub fn render_json<T>(res: &mut Response, status: StatusCode, body: T)
where
    T: Serialize + Send,
{
    res.status_code(status);
    res.render(Json(body));
}
