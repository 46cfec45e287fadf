use crate::RequestContext;

use axum::http::HeaderMap;
use googletest::assert_that;
use googletest::prelude::{eq, gt};
use gw_rpc::REQUEST_ID_HEADER;

#[test]
fn given_well_formed_client_id_when_creating_context_then_id_is_kept() {
    let ctx = RequestContext::new(Some("trace-01:abc.def_9"));

    assert_eq!(ctx.correlation_id, "trace-01:abc.def_9");
}

#[test]
fn given_no_client_id_when_creating_context_then_id_is_generated() {
    let ctx = RequestContext::new(None);

    assert!(ctx.correlation_id.starts_with("req-"));
    assert!(ctx.log_prefix().contains(&ctx.correlation_id));
}

#[test]
fn given_id_with_header_injection_when_creating_context_then_it_is_replaced() {
    let ctx = RequestContext::new(Some("abc\r\nx-user-id: admin"));

    assert!(ctx.correlation_id.starts_with("req-"));
}

#[test]
fn given_oversized_id_when_creating_context_then_it_is_replaced() {
    let long = "a".repeat(129);

    let ctx = RequestContext::new(Some(&long));

    assert!(ctx.correlation_id.starts_with("req-"));
}

#[test]
fn given_two_contexts_when_created_then_sequence_increases() {
    let first = RequestContext::new(None);
    let second = RequestContext::new(None);

    assert_that!(second.request_seq, gt(first.request_seq));
    assert_that!(first.correlation_id == second.correlation_id, eq(false));
}

#[test]
fn given_request_id_header_when_creating_from_headers_then_it_is_used() {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, "upstream-7".parse().unwrap());

    let ctx = RequestContext::from_headers(&headers);

    assert_eq!(ctx.correlation_id, "upstream-7");
}
