use crate::AuthorityStatus;
use crate::status_map;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use gw_core::ClientFault;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("{service} returned {status} ({code}): {message} {location}")]
    Status {
        service: String,
        status: AuthorityStatus,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("{service} call exceeded its {timeout_ms}ms deadline {location}")]
    DeadlineExceeded {
        service: String,
        timeout_ms: u128,
        location: ErrorLocation,
    },

    #[error("{service} transport error: {source} {location}")]
    Transport {
        service: String,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("{service} circuit open, retry after {retry_after_secs}s {location}")]
    CircuitOpen {
        service: String,
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    #[error("{service} response could not be decoded: {source} {location}")]
    Decode {
        service: String,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("{service} call requires {field} but the request has none {location}")]
    MissingContext {
        service: String,
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("{service} call has a {header} value that is not a valid header {location}")]
    InvalidMetadata {
        service: String,
        header: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid URL for {service}: {message} {location}")]
    InvalidUrl {
        service: String,
        message: String,
        location: ErrorLocation,
    },
}

impl RpcError {
    #[track_caller]
    pub fn status(
        service: &str,
        status: AuthorityStatus,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RpcError::Status {
            service: service.to_string(),
            status,
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Status equivalent of this failure, whatever its origin.
    pub fn authority_status(&self) -> AuthorityStatus {
        match self {
            Self::Status { status, .. } => *status,
            Self::DeadlineExceeded { .. } => AuthorityStatus::DeadlineExceeded,
            Self::Transport { .. } | Self::CircuitOpen { .. } => AuthorityStatus::Unavailable,
            Self::Decode { .. }
            | Self::MissingContext { .. }
            | Self::InvalidMetadata { .. }
            | Self::InvalidUrl { .. } => AuthorityStatus::Internal,
        }
    }

    /// Raw code from the authority's error body, if it sent one.
    pub fn authority_code(&self) -> Option<&str> {
        match self {
            Self::Status { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The authority could not be consulted at all.
    pub fn is_unavailable(&self) -> bool {
        self.authority_status().is_service_fault()
    }

    pub fn fault(&self) -> ClientFault {
        status_map::classify(self.authority_status())
    }
}

pub type Result<T> = StdResult<T, RpcError>;
