//! Client-facing error rendering
//!
//! Every failure leaves the gateway as a [`ResponseEnvelope`] whose code and
//! message come from the failing crate's [`ClientFault`] projection. Internal
//! detail stays in the logs.

use gw_auth::AuthError;
use gw_core::{ClientFault, ErrorKind, ResponseEnvelope, error_codes};
use gw_listing::ListingError;
use gw_rpc::RpcError;

use std::panic::Location;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{source} {location}")]
    Auth {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("{source} {location}")]
    Listing {
        #[source]
        source: ListingError,
        location: ErrorLocation,
    },

    #[error("Upstream call failed: {source} {location}")]
    Upstream {
        #[source]
        source: RpcError,
        location: ErrorLocation,
    },

    #[error("Invalid input: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    #[error("No route for {path} {location}")]
    RouteNotFound {
        path: String,
        location: ErrorLocation,
    },

    #[error("Not ready: {service} circuit is open {location}")]
    NotReady {
        service: String,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::RouteNotFound {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_ready(service: impl Into<String>) -> Self {
        Self::NotReady {
            service: service.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn fault(&self) -> ClientFault {
        match self {
            Self::Auth { source, .. } => source.fault(),
            Self::Listing { source, .. } => source.fault(),
            Self::Upstream { source, .. } => source.fault(),
            Self::InvalidInput { .. } => ClientFault::new(
                ErrorKind::BadRequest,
                error_codes::INVALID_INPUT,
                error_codes::INVALID_INPUT_MSG,
            ),
            Self::RouteNotFound { .. } => ClientFault::of_kind(ErrorKind::NotFound),
            Self::NotReady { .. } => ClientFault::service_unavailable(),
            Self::Internal { .. } => ClientFault::internal(),
        }
    }

    /// Seconds a client should wait before retrying, when known.
    pub fn retry_after_secs(&self) -> Option<u64> {
        let rpc = match self {
            Self::Auth {
                source: AuthError::RateLimitExceeded { window_secs, .. },
                ..
            } => return Some(*window_secs),
            Self::Auth {
                source: AuthError::Authority { source, .. },
                ..
            }
            | Self::Listing {
                source: ListingError::Authority { source, .. },
                ..
            }
            | Self::Upstream { source, .. } => source,
            _ => return None,
        };

        match rpc {
            RpcError::CircuitOpen {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let fault = self.fault();
        if fault.kind.is_server_fault() {
            log::error!("{}", self);
        } else {
            log::debug!("Request rejected with {}: {}", fault.code, self);
        }

        let status =
            StatusCode::from_u16(fault.kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(ResponseEnvelope::from(&fault))).into_response();

        if let Some(value) = self
            .retry_after_secs()
            .and_then(|secs| HeaderValue::from_str(&secs.to_string()).ok())
        {
            response.headers_mut().insert(RETRY_AFTER, value);
        }

        response
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Auth {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ListingError> for ApiError {
    #[track_caller]
    fn from(source: ListingError) -> Self {
        Self::Listing {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<RpcError> for ApiError {
    #[track_caller]
    fn from(source: RpcError) -> Self {
        Self::Upstream {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
