use crate::ApiError;

use std::any::Any;

use axum::response::{IntoResponse, Response};
use log::error;
use metrics::counter;

/// Turns a handler panic into an `INTERNAL_SERVER_ERROR` envelope.
///
/// Installed through `tower_http::catch_panic`; the payload is logged and
/// never sent to the client.
pub fn recover_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    counter!("gw.panics.recovered").increment(1);
    error!("Recovered from handler panic: {}", detail);

    ApiError::internal("handler panicked").into_response()
}
