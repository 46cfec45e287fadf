pub mod authority_status;
pub mod call_context;
pub mod circuit_breaker;
pub mod error;
pub mod outgoing_metadata;
pub mod service_client;
pub mod service_request;
pub mod status_map;

pub use authority_status::AuthorityStatus;
pub use call_context::{CallContext, ServiceScope};
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};
pub use error::{Result, RpcError};
pub use outgoing_metadata::{
    OutgoingMetadata, REQUEST_ID_HEADER, ROLES_HEADER, TENANT_ID_HEADER, USER_ID_HEADER,
};
pub use service_client::ServiceClient;
pub use service_request::ServiceRequest;
