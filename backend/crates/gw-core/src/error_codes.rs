//! Client-facing error codes and their default messages.
//!
//! Codes are part of the public contract of the gateway; messages are the
//! only text a client ever sees for a failure.

/// Authorization header absent
pub const AUTH_HEADER_MISSING: &str = "AUTH_HEADER_MISSING";
pub const AUTH_HEADER_MISSING_MSG: &str = "Authorization header is required";

/// Identity Authority rejected the credential
pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
pub const TOKEN_INVALID_MSG: &str = "Token is invalid";

/// Identity Authority reported the credential as expired
pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
pub const TOKEN_EXPIRED_MSG: &str = "Token has expired";

pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const UNAUTHORIZED_MSG: &str = "Authentication required";

pub const FORBIDDEN: &str = "FORBIDDEN";
pub const FORBIDDEN_MSG: &str = "Insufficient permissions";

/// Tenant header absent or empty on a tenant-scoped route
pub const SHOP_REQUIRED: &str = "SHOP_REQUIRED";
pub const SHOP_REQUIRED_MSG: &str = "X-Shop-Id header is required";

/// Caller does not own the requested tenant
pub const SHOP_ACCESS_DENIED: &str = "SHOP_ACCESS_DENIED";
pub const SHOP_ACCESS_DENIED_MSG: &str = "Access to this shop is denied";

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const NOT_FOUND_MSG: &str = "Resource not found";

pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const BAD_REQUEST_MSG: &str = "Bad request";

pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const INVALID_INPUT_MSG: &str = "Invalid input";

pub const INVALID_CURSOR_ENCODING: &str = "INVALID_CURSOR_ENCODING";
pub const INVALID_CURSOR_ENCODING_MSG: &str = "Cursor is not valid base64";

pub const INVALID_CURSOR_FORMAT: &str = "INVALID_CURSOR_FORMAT";
pub const INVALID_CURSOR_FORMAT_MSG: &str = "Cursor has an invalid format";

pub const INVALID_CURSOR_TIME: &str = "INVALID_CURSOR_TIME";
pub const INVALID_CURSOR_TIME_MSG: &str = "Cursor has an invalid timestamp";

pub const INVALID_CURSOR_ID: &str = "INVALID_CURSOR_ID";
pub const INVALID_CURSOR_ID_MSG: &str = "Cursor has an invalid id";

/// Resource already exists or was modified concurrently
pub const CONFLICT: &str = "CONFLICT";
pub const CONFLICT_MSG: &str = "Resource already exists";

pub const RATE_LIMITED: &str = "RATE_LIMITED";
pub const RATE_LIMITED_MSG: &str = "Too many requests";

/// A downstream authority is unreachable, slow, or circuit-broken
pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
pub const SERVICE_UNAVAILABLE_MSG: &str = "Service temporarily unavailable";

pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
pub const INTERNAL_SERVER_ERROR_MSG: &str = "Internal server error";
