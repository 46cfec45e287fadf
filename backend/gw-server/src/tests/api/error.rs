use crate::ApiError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use gw_auth::AuthError;
use gw_listing::ListingError;
use gw_rpc::{AuthorityStatus, RpcError};
use axum::http::{StatusCode, header::RETRY_AFTER};
use http_body_util::BodyExt;
use serde_json::Value;

async fn render(error: ApiError) -> (StatusCode, Option<String>, Value) {
    let response = error.into_response();
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .map(|value| value.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, retry_after, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_permission_denied_when_rendered_then_forbidden_envelope_without_subject() {
    let error = ApiError::from(AuthError::PermissionDenied {
        subject: "user-42".into(),
        missing: vec!["product:delete".into()],
        location: ErrorLocation::from(Location::caller()),
    });

    let (status, _, json) = render(error).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);
    assert_eq!(json["data"], Value::Null);
    assert_eq!(json["error"]["code"], "FORBIDDEN");
    assert!(!json.to_string().contains("user-42"));
}

#[tokio::test]
async fn given_malformed_cursor_when_rendered_then_bad_request_with_cursor_code() {
    let error = ApiError::from(ListingError::CursorFormat {
        fields: 1,
        location: ErrorLocation::from(Location::caller()),
    });

    let (status, _, json) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_CURSOR_FORMAT");
}

#[tokio::test]
async fn given_authority_not_found_when_rendered_then_table_message_not_authority_text() {
    let error = ApiError::from(RpcError::status(
        "products",
        AuthorityStatus::NotFound,
        "NOT_FOUND",
        "row 7f3a missing in products_db",
    ));

    let (status, _, json) = render(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Resource not found");
    assert!(!json.to_string().contains("products_db"));
}

#[tokio::test]
async fn given_rate_limit_exceeded_when_rendered_then_429_with_retry_after() {
    let error = ApiError::from(AuthError::RateLimitExceeded {
        limit: 100,
        window_secs: 60,
        location: ErrorLocation::from(Location::caller()),
    });

    let (status, retry_after, json) = render(error).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(retry_after.as_deref(), Some("60"));
    assert_eq!(json["error"]["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn given_open_circuit_behind_listing_when_rendered_then_503_with_retry_after() {
    let error = ApiError::from(ListingError::Authority {
        source: RpcError::CircuitOpen {
            service: "products".into(),
            retry_after_secs: 12,
            location: ErrorLocation::from(Location::caller()),
        },
        location: ErrorLocation::from(Location::caller()),
    });

    let (status, retry_after, json) = render(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(retry_after.as_deref(), Some("12"));
    assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_generic_message_only() {
    let (status, retry_after, json) = render(ApiError::internal("mutex poisoned in cache")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(retry_after, None);
    assert_eq!(json["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(json["error"]["message"], "Internal server error");
}

#[tokio::test]
async fn given_invalid_input_when_rendered_then_400_invalid_input() {
    let (status, _, json) = render(ApiError::invalid_input("expected a JSON object")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_INPUT");
    assert_eq!(json["error"]["message"], "Invalid input");
}

#[tokio::test]
async fn given_not_ready_when_rendered_then_503_without_service_name() {
    let (status, _, json) = render(ApiError::not_ready("auth")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
    assert!(!json.to_string().contains("auth"));
}
