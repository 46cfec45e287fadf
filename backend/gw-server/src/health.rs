use crate::api::error::Result as ApiResult;
use crate::api::{Envelope, ok};
use crate::{ApiError, AppState};

use axum::{
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use gw_rpc::CircuitState;
use serde_json::{Map, Value, json};

/// GET /health - breaker state of every downstream service
pub async fn health_check(State(state): State<AppState>) -> Envelope<Value> {
    let mut components = Map::new();
    let mut degraded = false;
    for client in [&state.auth, &state.users, &state.shops, &state.products] {
        let breaker = client.breaker().state();
        degraded |= breaker != CircuitState::Closed;
        components.insert(client.name().to_string(), json!(breaker.as_str()));
    }

    ok(json!({
        "status": if degraded { "degraded" } else { "healthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": Value::Object(components),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /live - the process is up
pub async fn liveness_check() -> Envelope<&'static str> {
    ok("OK")
}

/// GET /ready - no request can pass identity resolution while the
/// identity authority's breaker is open
pub async fn readiness_check(
    State(state): State<AppState>,
) -> ApiResult<Envelope<&'static str>> {
    match state.auth.breaker().state() {
        CircuitState::Open => Err(ApiError::not_ready(state.auth.name())),
        _ => Ok(ok("Ready")),
    }
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => ApiError::route_not_found("/metrics").into_response(),
    }
}
