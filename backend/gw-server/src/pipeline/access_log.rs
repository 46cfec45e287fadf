use crate::RequestContext;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use gw_rpc::REQUEST_ID_HEADER;
use log::{info, warn};
use metrics::counter;

/// Assigns the request its [`RequestContext`], echoes the correlation id
/// back in `x-request-id` and logs one line per request.
pub async fn access_log(mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_headers(request.headers());
    request.extensions_mut().insert(ctx.clone());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    let status = response.status();
    counter!("gw.requests", "status" => status.as_u16().to_string()).increment(1);
    if let Ok(value) = HeaderValue::from_str(&ctx.correlation_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    if status.is_server_error() {
        warn!(
            "{} {} {} -> {} ({}ms)",
            ctx.log_prefix(),
            method,
            path,
            status.as_u16(),
            ctx.elapsed_ms()
        );
    } else {
        info!(
            "{} {} {} -> {} ({}ms)",
            ctx.log_prefix(),
            method,
            path,
            status.as_u16(),
            ctx.elapsed_ms()
        );
    }

    response
}
