//! Integration tests for ServiceClient against a wiremock backend

use gw_core::{ErrorKind, Identity, TenantId, error_codes};
use gw_rpc::{
    AuthorityStatus, CallContext, CircuitBreakerConfig, CircuitState, RpcError, ServiceClient,
    ServiceRequest, ServiceScope,
};

use std::str::FromStr;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn client(server: &MockServer, scope: ServiceScope) -> ServiceClient {
    client_with(server, scope, Duration::from_secs(2), CircuitBreakerConfig::default())
}

fn client_with(
    server: &MockServer,
    scope: ServiceScope,
    timeout: Duration,
    breaker: CircuitBreakerConfig,
) -> ServiceClient {
    ServiceClient::new("backend", &server.uri(), scope, timeout, breaker).unwrap()
}

fn merchant() -> Identity {
    Identity::new("user-1", "MERCHANT", ["product:read"])
}

#[tokio::test]
async fn given_tenant_scope_when_calling_then_identity_and_tenant_headers_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(header("x-user-id", "user-1"))
        .and(header("x-roles", "MERCHANT"))
        .and(header("x-shop-id", "shop-9"))
        .and(header("x-request-id", "req-1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;

    let identity = merchant();
    let tenant = TenantId::from_str("shop-9").unwrap();
    let ctx = CallContext::tenant(&identity, &tenant).with_request_id("req-1");
    let result: Value = client(&server, ServiceScope::UserAndTenant)
        .call(ServiceRequest::get("/v1/products").query("limit", "20"), &ctx)
        .await
        .unwrap();

    assert_eq!(result, json!({"products": []}));
}

#[tokio::test]
async fn given_user_scope_when_calling_then_tenant_header_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/shops/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "shop-9"})))
        .mount(&server)
        .await;

    let identity = merchant();
    let tenant = TenantId::from_str("shop-9").unwrap();
    let ctx = CallContext::tenant(&identity, &tenant);
    let _: Value = client(&server, ServiceScope::User)
        .call(ServiceRequest::get("/v1/shops/me"), &ctx)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("x-user-id").is_some());
    assert!(received[0].headers.get("x-shop-id").is_none());
}

#[tokio::test]
async fn given_json_body_when_posting_then_body_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tokens/validate"))
        .and(body_json(json!({"token": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": "u"})))
        .expect(1)
        .mount(&server)
        .await;

    let result: Value = client(&server, ServiceScope::Anonymous)
        .call(
            ServiceRequest::post("/v1/tokens/validate").json(json!({"token": "abc"})),
            &CallContext::anonymous(),
        )
        .await
        .unwrap();

    assert_eq!(result["user_id"], "u");
}

#[tokio::test]
async fn given_empty_success_body_when_calling_then_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/shops/me"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let identity = merchant();
    let result: Value = client(&server, ServiceScope::User)
        .call(ServiceRequest::delete("/v1/shops/me"), &CallContext::user(&identity))
        .await
        .unwrap();

    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn given_error_body_with_status_code_when_calling_then_status_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "NOT_FOUND",
            "message": "no such product in table products_v2"
        })))
        .mount(&server)
        .await;

    let identity = merchant();
    let err = client(&server, ServiceScope::User)
        .call::<Value>(ServiceRequest::get("/v1/x"), &CallContext::user(&identity))
        .await
        .unwrap_err();

    assert_eq!(err.authority_status(), AuthorityStatus::NotFound);
    let fault = err.fault();
    assert_eq!(fault.kind, ErrorKind::NotFound);
    assert_eq!(fault.message, error_codes::NOT_FOUND_MSG);
}

#[tokio::test]
async fn given_enveloped_error_body_when_calling_then_code_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": "PERMISSION_DENIED", "message": "nope"}
        })))
        .mount(&server)
        .await;

    let identity = merchant();
    let err = client(&server, ServiceScope::User)
        .call::<Value>(ServiceRequest::get("/v1/x"), &CallContext::user(&identity))
        .await
        .unwrap_err();

    assert_eq!(err.authority_status(), AuthorityStatus::PermissionDenied);
    assert_eq!(err.authority_code(), Some("PERMISSION_DENIED"));
}

#[tokio::test]
async fn given_unrecognised_code_when_calling_then_http_status_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "SHOP_NOT_FOUND",
            "message": "shop not found"
        })))
        .mount(&server)
        .await;

    let identity = merchant();
    let err = client(&server, ServiceScope::User)
        .call::<Value>(ServiceRequest::get("/v1/shops/me"), &CallContext::user(&identity))
        .await
        .unwrap_err();

    assert_eq!(err.authority_status(), AuthorityStatus::NotFound);
    assert_eq!(err.authority_code(), Some("SHOP_NOT_FOUND"));
}

#[tokio::test]
async fn given_slow_backend_when_calling_then_deadline_exceeded_maps_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let identity = merchant();
    let err = client_with(
        &server,
        ServiceScope::User,
        Duration::from_millis(50),
        CircuitBreakerConfig::default(),
    )
    .call::<Value>(ServiceRequest::get("/v1/slow"), &CallContext::user(&identity))
    .await
    .unwrap_err();

    assert!(matches!(err, RpcError::DeadlineExceeded { .. }));
    assert_eq!(err.fault().kind, ErrorKind::ServiceUnavailable);
}

fn hair_trigger() -> CircuitBreakerConfig {
    CircuitBreakerConfig {
        failure_threshold: 1,
        ..CircuitBreakerConfig::default()
    }
}

async fn mount_stalled_and_fast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/stalled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"late": true}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn given_in_flight_call_when_future_dropped_then_no_outcome_recorded() {
    let server = MockServer::start().await;
    mount_stalled_and_fast(&server).await;
    let client = client_with(
        &server,
        ServiceScope::User,
        Duration::from_secs(10),
        hair_trigger(),
    );
    let identity = merchant();
    let ctx = CallContext::user(&identity);

    let mut call = Box::pin(client.call::<Value>(ServiceRequest::get("/v1/stalled"), &ctx));
    tokio::select! {
        _ = &mut call => panic!("stalled call finished before the caller gave up"),
        _ = tokio::time::sleep(Duration::from_millis(300)) => {}
    }
    drop(call);

    // A single recorded failure would have opened this breaker
    assert_eq!(client.breaker().state(), CircuitState::Closed);
    let next: Value = client
        .call(ServiceRequest::get("/v1/fast"), &ctx)
        .await
        .unwrap();
    assert_eq!(next, json!({"ok": true}));
}

#[tokio::test]
async fn given_in_flight_call_when_task_aborted_then_cancelled_and_breaker_untouched() {
    let server = MockServer::start().await;
    mount_stalled_and_fast(&server).await;
    let client = client_with(
        &server,
        ServiceScope::User,
        Duration::from_secs(10),
        hair_trigger(),
    );

    let task = tokio::spawn({
        let client = client.clone();
        async move {
            let identity = merchant();
            client
                .call::<Value>(
                    ServiceRequest::get("/v1/stalled"),
                    &CallContext::user(&identity),
                )
                .await
        }
    });
    tokio::time::sleep(Duration::from_millis(300)).await;
    task.abort();

    let joined = task.await;
    assert!(joined.unwrap_err().is_cancelled());
    assert_eq!(client.breaker().state(), CircuitState::Closed);
}

#[tokio::test]
async fn given_unreachable_backend_when_calling_then_transport_error_maps_to_unavailable() {
    // Nothing listens on port 9 on loopback
    let client = ServiceClient::new(
        "dead",
        "http://127.0.0.1:9",
        ServiceScope::Anonymous,
        Duration::from_secs(2),
        CircuitBreakerConfig::default(),
    )
    .unwrap();

    let err = client
        .call::<Value>(ServiceRequest::get("/"), &CallContext::anonymous())
        .await
        .unwrap_err();

    assert!(err.is_unavailable());
    assert_eq!(err.fault().code, error_codes::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn given_repeated_server_errors_when_calling_then_circuit_opens_and_fails_fast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let identity = merchant();
    let ctx = CallContext::user(&identity);
    let client = client_with(
        &server,
        ServiceScope::User,
        Duration::from_secs(2),
        CircuitBreakerConfig {
            failure_threshold: 2,
            ..CircuitBreakerConfig::default()
        },
    );

    for _ in 0..2 {
        let err = client
            .call::<Value>(ServiceRequest::get("/v1/x"), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.authority_status(), AuthorityStatus::Unavailable);
    }
    let err = client
        .call::<Value>(ServiceRequest::get("/v1/x"), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::CircuitOpen { .. }));
    assert_eq!(client.breaker().state(), CircuitState::Open);
}

#[tokio::test]
async fn given_rescoped_client_when_circuit_opens_then_both_scopes_fail_fast() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let identity = merchant();
    let tenant = TenantId::from_str("shop-9").unwrap();
    let user_client = client_with(
        &server,
        ServiceScope::User,
        Duration::from_secs(2),
        CircuitBreakerConfig {
            failure_threshold: 1,
            ..CircuitBreakerConfig::default()
        },
    );
    let tenant_client = user_client.with_scope(ServiceScope::UserAndTenant);

    let _ = tenant_client
        .call::<Value>(
            ServiceRequest::put("/v1/shops/me"),
            &CallContext::tenant(&identity, &tenant),
        )
        .await;
    let err = user_client
        .call::<Value>(ServiceRequest::get("/v1/shops/me"), &CallContext::user(&identity))
        .await
        .unwrap_err();

    assert_eq!(tenant_client.scope(), ServiceScope::UserAndTenant);
    assert_eq!(user_client.scope(), ServiceScope::User);
    assert!(matches!(err, RpcError::CircuitOpen { .. }));
}

#[tokio::test]
async fn given_client_rejections_when_calling_then_circuit_stays_closed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let identity = merchant();
    let ctx = CallContext::user(&identity);
    let client = client_with(
        &server,
        ServiceScope::User,
        Duration::from_secs(2),
        CircuitBreakerConfig {
            failure_threshold: 1,
            ..CircuitBreakerConfig::default()
        },
    );

    for _ in 0..3 {
        let _ = client.call::<Value>(ServiceRequest::get("/v1/x"), &ctx).await;
    }

    assert_eq!(client.breaker().state(), CircuitState::Closed);
}

#[tokio::test]
async fn given_missing_tenant_when_calling_then_no_request_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let identity = merchant();
    let err = client(&server, ServiceScope::UserAndTenant)
        .call::<Value>(ServiceRequest::get("/v1/products"), &CallContext::user(&identity))
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::MissingContext { .. }));
    assert_eq!(err.fault().kind, ErrorKind::Internal);
}

#[tokio::test]
async fn given_subject_id_with_control_bytes_when_calling_then_internal_and_breaker_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_with(
        &server,
        ServiceScope::User,
        Duration::from_secs(2),
        hair_trigger(),
    );
    let identity = Identity::new("user\u{7f}\n1", "MERCHANT", ["product:read"]);

    let err = client
        .call::<Value>(ServiceRequest::get("/v1/users/me"), &CallContext::user(&identity))
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::InvalidMetadata { .. }));
    assert_eq!(err.fault().kind, ErrorKind::Internal);
    assert_eq!(client.breaker().state(), CircuitState::Closed);
}

#[tokio::test]
async fn given_invalid_base_url_when_constructing_then_error() {
    let result = ServiceClient::new(
        "bad",
        "not a url",
        ServiceScope::Anonymous,
        Duration::from_secs(1),
        CircuitBreakerConfig::default(),
    );

    assert!(matches!(result, Err(RpcError::InvalidUrl { .. })));
}
