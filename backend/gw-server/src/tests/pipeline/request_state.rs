use crate::{RequestContext, RequestState};

use gw_core::{Identity, TenantId};
use gw_rpc::{OutgoingMetadata, ServiceScope, TENANT_ID_HEADER, USER_ID_HEADER};

fn identity() -> Identity {
    Identity::new("user-1", "seller", ["product:read"])
}

#[test]
fn given_no_identity_when_finishing_pipeline_then_internal_error() {
    let state = RequestState::new(RequestContext::new(None));

    assert!(state.identity().is_err());
    assert!(state.into_authorized().is_err());
}

#[test]
fn given_identity_only_when_authorized_then_tenant_is_unavailable() {
    let mut state = RequestState::new(RequestContext::new(Some("req-a")));
    state.identity = Some(identity());

    let request = state.into_authorized().unwrap();

    assert!(request.tenant().is_err());
    let metadata =
        OutgoingMetadata::for_scope("users", ServiceScope::User, &request.call_context()).unwrap();
    assert_eq!(metadata.get(USER_ID_HEADER), Some("user-1"));
    assert_eq!(metadata.get(TENANT_ID_HEADER), None);
}

#[test]
fn given_identity_and_tenant_when_authorized_then_call_context_carries_both() {
    let mut state = RequestState::new(RequestContext::new(Some("req-b")));
    state.identity = Some(identity());
    state.tenant = Some("shop-9".parse::<TenantId>().unwrap());

    let request = state.into_authorized().unwrap();
    let metadata = OutgoingMetadata::for_scope(
        "products",
        ServiceScope::UserAndTenant,
        &request.call_context(),
    )
    .unwrap();

    assert_eq!(metadata.get(USER_ID_HEADER), Some("user-1"));
    assert_eq!(metadata.get(TENANT_ID_HEADER), Some("shop-9"));
    assert_eq!(metadata.get("x-request-id"), Some("req-b"));
}
