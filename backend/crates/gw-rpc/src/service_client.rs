use crate::{
    AuthorityStatus, CallContext, CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError,
    OutgoingMetadata, Result, RpcError, ServiceRequest, ServiceScope,
};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, warn};
use metrics::counter;
use reqwest::{Client as ReqwestClient, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// JSON error body returned by a backend on failure.
///
/// Accepts both `{"code","message"}` and the enveloped
/// `{"error":{"code","message"}}` shape.
#[derive(Debug, Default, Deserialize)]
struct ErrorReply {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorReply {
    fn into_parts(self) -> (Option<String>, Option<String>) {
        let detail = self.error.unwrap_or_default();
        (self.code.or(detail.code), self.message.or(detail.message))
    }
}

/// HTTP/JSON client for one downstream service.
///
/// Every call is bounded by the service deadline, passes through the
/// service's circuit breaker and carries exactly the metadata its scope
/// declares. Dropping the returned future aborts the in-flight request.
#[derive(Clone)]
pub struct ServiceClient {
    name: String,
    base_url: String,
    scope: ServiceScope,
    timeout: Duration,
    http: ReqwestClient,
    breaker: Arc<CircuitBreaker>,
}

impl ServiceClient {
    /// # Arguments
    /// * `name` - Service name used in logs, metrics and errors
    /// * `base_url` - Service root (e.g., "http://127.0.0.1:50051")
    /// * `scope` - Request-scoped fields every call must carry
    /// * `timeout` - Deadline for a single call, body included
    #[track_caller]
    pub fn new(
        name: &str,
        base_url: &str,
        scope: ServiceScope,
        timeout: Duration,
        breaker_config: CircuitBreakerConfig,
    ) -> Result<Self> {
        Url::parse(base_url).map_err(|e| RpcError::InvalidUrl {
            service: name.to_string(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            scope,
            timeout,
            http: ReqwestClient::new(),
            breaker: Arc::new(CircuitBreaker::new(name, breaker_config)),
        })
    }

    /// Same service, connection pool and breaker, different metadata scope.
    pub fn with_scope(&self, scope: ServiceScope) -> Self {
        Self {
            scope,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> ServiceScope {
        self.scope
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Perform `request` and decode a successful reply as `T`.
    ///
    /// An empty success body decodes as JSON `null`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: ServiceRequest,
        ctx: &CallContext<'_>,
    ) -> Result<T> {
        let metadata = OutgoingMetadata::for_scope(&self.name, self.scope, ctx)?;

        if let Err(CircuitBreakerError::CircuitOpen { retry_after_secs }) =
            self.breaker.allow_request()
        {
            self.record("circuit_open");
            return Err(RpcError::CircuitOpen {
                service: self.name.clone(),
                retry_after_secs,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let url = self.url(&request)?;
        debug!("{} {} {}", self.name, request.method, url.path());

        let mut builder = self.http.request(request.method.clone(), url);
        builder = metadata.apply(builder);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        };

        let (status, bytes) = match tokio::time::timeout(self.timeout, exchange).await {
            Err(_) => {
                self.breaker.record_failure();
                self.record("deadline_exceeded");
                warn!(
                    "{} {} exceeded {}ms deadline",
                    self.name,
                    request.path,
                    self.timeout.as_millis()
                );
                return Err(RpcError::DeadlineExceeded {
                    service: self.name.clone(),
                    timeout_ms: self.timeout.as_millis(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Ok(Err(source)) => {
                self.breaker.record_failure();
                self.record("transport_error");
                warn!("{} {} transport error: {}", self.name, request.path, source);
                return Err(RpcError::Transport {
                    service: self.name.clone(),
                    source,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Ok(Ok(exchanged)) => exchanged,
        };

        if status.is_success() {
            self.breaker.record_success();
            self.record("ok");
            let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
            return serde_json::from_slice(payload).map_err(|source| RpcError::Decode {
                service: self.name.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Err(self.failure(status, &bytes))
    }

    fn failure(&self, status: StatusCode, bytes: &[u8]) -> RpcError {
        let reply: ErrorReply = serde_json::from_slice(bytes).unwrap_or_default();
        let (code, message) = reply.into_parts();
        let authority_status = code
            .as_deref()
            .and_then(AuthorityStatus::from_code)
            .unwrap_or_else(|| AuthorityStatus::from_http(status.as_u16()));

        if authority_status.is_service_fault() {
            self.breaker.record_failure();
        } else {
            // A well-formed rejection means the service is healthy
            self.breaker.record_success();
        }
        self.record(authority_status.as_str());

        RpcError::status(
            &self.name,
            authority_status,
            code.unwrap_or_else(|| authority_status.as_str().to_string()),
            message.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        )
    }

    #[track_caller]
    fn url(&self, request: &ServiceRequest) -> Result<Url> {
        let mut url =
            Url::parse(&format!("{}{}", self.base_url, request.path)).map_err(|e| {
                RpcError::InvalidUrl {
                    service: self.name.clone(),
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    fn record(&self, outcome: &'static str) {
        counter!(
            "gw.authority.calls",
            "service" => self.name.clone(),
            "outcome" => outcome
        )
        .increment(1);
    }
}
