use salvo::{Request, Response, handler};

use super::response::ApiError;

/// ## Summary
/// Answers every request no other route matched.
#[handler]
pub async fn not_found(req: &mut Request, res: &mut Response) {
    let message = format!("resource {} {} not found", req.method(), req.uri().path());
    tracing::info!(%message, "no route matched");
    ApiError::not_found(message).render(res);
}
