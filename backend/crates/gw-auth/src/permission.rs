use crate::{AuthError, Result};

use std::panic::Location;

use error_location::ErrorLocation;
use gw_core::Identity;

/// Grant iff every capability in `required` is held. An empty requirement
/// always passes. Pure: no I/O, no caching.
#[track_caller]
pub fn check_permissions(identity: &Identity, required: &[&str]) -> Result<()> {
    let missing = identity.missing_permissions(required);
    if missing.is_empty() {
        return Ok(());
    }

    Err(AuthError::PermissionDenied {
        subject: identity.subject_id.clone(),
        missing: missing.into_iter().map(String::from).collect(),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Grant iff the identity's role is one of `allowed`. An empty list always passes.
#[track_caller]
pub fn check_role(identity: &Identity, allowed: &[&str]) -> Result<()> {
    if allowed.is_empty() || allowed.contains(&identity.role.as_str()) {
        return Ok(());
    }

    Err(AuthError::RoleDenied {
        role: identity.role.clone(),
        allowed: allowed.iter().map(|role| role.to_string()).collect(),
        location: ErrorLocation::from(Location::caller()),
    })
}
