use salvo::Depot;

/// ## Summary
/// Logs every request that reaches the API router.
pub struct RequestLogMiddleware;

#[salvo::async_trait]
impl salvo::Handler for RequestLogMiddleware {
    #[tracing::instrument(skip_all, fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::info!("incoming request");

        ctrl.call_next(req, depot, res).await;

        tracing::debug!(status = ?res.status_code, "request handled");
    }
}
