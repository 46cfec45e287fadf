pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod pipeline;
pub mod routes;
pub mod shutdown_coordinator;
pub mod shutdown_guard;

#[cfg(test)]
mod tests;

pub use api::error::{ApiError, Result as ApiResult};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};
pub use pipeline::{
    request_context::RequestContext,
    request_state::{AuthorizedRequest, RequestState},
    route_policy::{AUTHORIZATION_HEADER, RoutePolicy, TENANT_HEADER},
    stage::Stage,
};
pub use routes::build_router;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
