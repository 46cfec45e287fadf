use crate::error_codes;

use serde::Serialize;

/// Closed set of failure categories a client can observe.
///
/// Every internal error is reduced to exactly one kind, and every kind maps to
/// exactly one HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    ServiceUnavailable,
    Internal,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::RateLimited => 429,
            Self::ServiceUnavailable => 503,
            Self::Internal => 500,
        }
    }

    /// Code used when a more specific one is not available.
    pub const fn default_code(&self) -> &'static str {
        match self {
            Self::BadRequest => error_codes::BAD_REQUEST,
            Self::Unauthenticated => error_codes::UNAUTHORIZED,
            Self::Forbidden => error_codes::FORBIDDEN,
            Self::NotFound => error_codes::NOT_FOUND,
            Self::Conflict => error_codes::CONFLICT,
            Self::RateLimited => error_codes::RATE_LIMITED,
            Self::ServiceUnavailable => error_codes::SERVICE_UNAVAILABLE,
            Self::Internal => error_codes::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => error_codes::BAD_REQUEST_MSG,
            Self::Unauthenticated => error_codes::UNAUTHORIZED_MSG,
            Self::Forbidden => error_codes::FORBIDDEN_MSG,
            Self::NotFound => error_codes::NOT_FOUND_MSG,
            Self::Conflict => error_codes::CONFLICT_MSG,
            Self::RateLimited => error_codes::RATE_LIMITED_MSG,
            Self::ServiceUnavailable => error_codes::SERVICE_UNAVAILABLE_MSG,
            Self::Internal => error_codes::INTERNAL_SERVER_ERROR_MSG,
        }
    }

    /// Server-side faults; everything else is the caller's problem.
    pub const fn is_server_fault(&self) -> bool {
        matches!(self, Self::ServiceUnavailable | Self::Internal)
    }
}
