use salvo::async_trait;

use crate::error::AppResult;
use calendar_core::error::CoreError;
use calendar_service::Services;

pub struct ServicesHandler {
    pub services: Services,
}

#[async_trait]
impl salvo::Handler for ServicesHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.services.clone());
    }
}

/// ## Summary
/// Retrieves the service bundle from the depot.
///
/// ## Errors
/// Returns an error if no `ServicesHandler` ran before the handler.
pub fn get_services_from_depot(depot: &salvo::Depot) -> AppResult<Services> {
    depot
        .obtain::<Services>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Services not found in depot").into())
}
