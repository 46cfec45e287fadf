use error_location::ErrorLocation;
use gw_core::{ClientFault, ErrorKind, error_codes};
use gw_rpc::RpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Empty bearer credential {location}")]
    EmptyToken { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing tenant header {location}")]
    TenantRequired { location: ErrorLocation },

    #[error("Access to tenant '{tenant}' denied for '{subject}': {message} {location}")]
    TenantAccessDenied {
        subject: String,
        tenant: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Subject '{subject}' lacks permissions {missing:?} {location}")]
    PermissionDenied {
        subject: String,
        missing: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Role '{role}' not allowed, expected one of {allowed:?} {location}")]
    RoleDenied {
        role: String,
        allowed: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} requests per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Authority call failed: {source} {location}")]
    Authority {
        #[source]
        source: RpcError,
        location: ErrorLocation,
    },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } => error_codes::AUTH_HEADER_MISSING,
            Self::EmptyToken { .. } | Self::InvalidToken { .. } => error_codes::TOKEN_INVALID,
            Self::TokenExpired { .. } => error_codes::TOKEN_EXPIRED,
            Self::TenantRequired { .. } => error_codes::SHOP_REQUIRED,
            Self::TenantAccessDenied { .. } => error_codes::SHOP_ACCESS_DENIED,
            Self::PermissionDenied { .. } | Self::RoleDenied { .. } => error_codes::FORBIDDEN,
            Self::RateLimitExceeded { .. } => error_codes::RATE_LIMITED,
            Self::Authority { source, .. } => source.fault().code,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingHeader { .. }
            | Self::EmptyToken { .. }
            | Self::InvalidToken { .. }
            | Self::TokenExpired { .. } => ErrorKind::Unauthenticated,
            Self::TenantRequired { .. } => ErrorKind::BadRequest,
            Self::TenantAccessDenied { .. }
            | Self::PermissionDenied { .. }
            | Self::RoleDenied { .. } => ErrorKind::Forbidden,
            Self::RateLimitExceeded { .. } => ErrorKind::RateLimited,
            Self::Authority { source, .. } => source.fault().kind,
        }
    }

    /// Client-facing projection. Never carries subject ids, tenant ids or
    /// authority text.
    pub fn fault(&self) -> ClientFault {
        if let Self::Authority { source, .. } = self {
            return source.fault();
        }

        let message = match self {
            Self::MissingHeader { .. } => error_codes::AUTH_HEADER_MISSING_MSG,
            Self::EmptyToken { .. } | Self::InvalidToken { .. } => error_codes::TOKEN_INVALID_MSG,
            Self::TokenExpired { .. } => error_codes::TOKEN_EXPIRED_MSG,
            Self::TenantRequired { .. } => error_codes::SHOP_REQUIRED_MSG,
            Self::TenantAccessDenied { .. } => error_codes::SHOP_ACCESS_DENIED_MSG,
            Self::PermissionDenied { .. } | Self::RoleDenied { .. } => error_codes::FORBIDDEN_MSG,
            Self::RateLimitExceeded { .. } => error_codes::RATE_LIMITED_MSG,
            Self::Authority { .. } => error_codes::INTERNAL_SERVER_ERROR_MSG,
        };
        ClientFault::new(self.kind(), self.error_code(), message)
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
