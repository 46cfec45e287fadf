use std::convert::Infallible;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use gw_rpc::REQUEST_ID_HEADER;
use uuid::Uuid;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

const MAX_CORRELATION_ID_LEN: usize = 128;

/// Request context for correlation and tracing
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id from `x-request-id`, or generated
    pub correlation_id: String,
    /// Sequence number within this server instance
    pub request_seq: u64,
    pub started_at: Instant,
}

impl RequestContext {
    pub fn new(correlation_id: Option<&str>) -> Self {
        let request_seq = REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst);

        let correlation_id = match correlation_id.map(str::trim) {
            Some(id) if is_usable(id) => id.to_string(),
            _ => format!("req-{}-{}", request_seq, Uuid::new_v4().as_simple()),
        };

        Self {
            correlation_id,
            request_seq,
            started_at: Instant::now(),
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::new(
            headers
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
        )
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    pub fn log_prefix(&self) -> String {
        format!("[req={} seq={}]", self.correlation_id, self.request_seq)
    }
}

/// Client-supplied ids are echoed into logs and outbound headers
fn is_usable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CORRELATION_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

/// Reuses the context the access-log middleware stored on the request,
/// creating one if the middleware is not installed.
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            Ok(parts
                .extensions
                .get::<RequestContext>()
                .cloned()
                .unwrap_or_else(|| RequestContext::from_headers(&parts.headers)))
        }
    }
}
