pub mod client_fault;
pub mod error;
pub mod error_codes;
pub mod error_kind;
pub mod identity;
pub mod response_envelope;
pub mod tenant_id;

pub use client_fault::ClientFault;
pub use error::{CoreError, CoreResult};
pub use error_kind::ErrorKind;
pub use identity::Identity;
pub use response_envelope::{ErrorBody, ResponseEnvelope};
pub use tenant_id::TenantId;
