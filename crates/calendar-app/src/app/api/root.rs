use salvo::{Router, handler, writing::Json};

use calendar_core::constants::HEALTHCHECK_ROUTE_COMPONENT;

use super::response::MessageResponse;

#[handler]
async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "welcome to calendar api".to_string(),
    })
}

#[handler]
async fn healthcheck() -> &'static str {
    "OK"
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .get(welcome)
        .push(Router::with_path(HEALTHCHECK_ROUTE_COMPONENT).get(healthcheck))
}
