use crate::{AuthError, Result};

use std::panic::Location;

use error_location::ErrorLocation;

const BEARER_PREFIX: &str = "Bearer ";

/// Credential carried by an `Authorization` header value.
///
/// The `Bearer ` prefix is stripped when present; a bare token is accepted
/// as-is. Absent header and empty credential are both rejected.
#[track_caller]
pub fn bearer_token(header: Option<&str>) -> Result<&str> {
    let value = header.ok_or_else(|| AuthError::MissingHeader {
        location: ErrorLocation::from(Location::caller()),
    })?;

    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
    if token.is_empty() {
        return Err(AuthError::EmptyToken {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(token)
}
