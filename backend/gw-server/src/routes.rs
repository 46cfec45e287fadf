use crate::api::{products, shops, users};
use crate::pipeline::{access_log::access_log, panic_handler::recover_panic};
use crate::{ApiError, AppState, health};

use axum::{
    Router,
    http::Uri,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Identity-scoped routes
        .route("/api/users/me", get(users::get_me))
        .route("/api/shops", post(shops::create_shop))
        .route(
            "/api/shops/me",
            get(shops::get_my_shop)
                .put(shops::update_my_shop)
                .delete(shops::delete_my_shop),
        )
        // Tenant-scoped routes
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .fallback(route_not_found)
        .with_state(state)
        // Innermost: a panicking handler still passes through the access log
        .layer(CatchPanicLayer::custom(recover_panic))
        .layer(middleware::from_fn(access_log))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn route_not_found(uri: Uri) -> Response {
    ApiError::route_not_found(uri.path()).into_response()
}
