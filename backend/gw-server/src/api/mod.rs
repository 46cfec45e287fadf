pub mod error;
pub mod policies;
pub mod products;
pub mod shops;
pub mod users;

use crate::ApiError;
use crate::api::error::Result as ApiResult;

use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};
use gw_core::ResponseEnvelope;
use serde_json::Value;

pub type Envelope<T> = Json<ResponseEnvelope<T>>;

pub fn ok<T>(data: T) -> Envelope<T> {
    Json(ResponseEnvelope::ok(data))
}

pub fn created<T>(data: T) -> (StatusCode, Envelope<T>) {
    (StatusCode::CREATED, ok(data))
}

/// Unwrap a JSON body, turning axum's rejection into an enveloped 400.
#[track_caller]
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))
}
