use crate::{CallContext, Result, RpcError, ServiceScope};

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::header::HeaderValue;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ROLES_HEADER: &str = "x-roles";
pub const TENANT_ID_HEADER: &str = "x-shop-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headers attached to an outbound call.
///
/// Built from the call context according to the target's scope: identity
/// fields only for `User`, identity and tenant for `UserAndTenant`, neither
/// for `Anonymous`. The correlation id travels whenever it is known.
/// Every value is checked against HTTP header syntax while building, so a
/// malformed identity fails here rather than as a transport error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMetadata {
    entries: Vec<(&'static str, String)>,
}

impl OutgoingMetadata {
    #[track_caller]
    pub fn for_scope(service: &str, scope: ServiceScope, ctx: &CallContext<'_>) -> Result<Self> {
        let mut entries = Vec::with_capacity(4);

        if scope.requires_identity() {
            let identity = ctx.identity.ok_or_else(|| RpcError::MissingContext {
                service: service.to_string(),
                field: "identity",
                location: ErrorLocation::from(Location::caller()),
            })?;
            push_checked(&mut entries, service, USER_ID_HEADER, &identity.subject_id)?;
            push_checked(&mut entries, service, ROLES_HEADER, &identity.role)?;
        }

        if scope.requires_tenant() {
            let tenant = ctx.tenant.ok_or_else(|| RpcError::MissingContext {
                service: service.to_string(),
                field: "tenant",
                location: ErrorLocation::from(Location::caller()),
            })?;
            push_checked(&mut entries, service, TENANT_ID_HEADER, tenant.as_str())?;
        }

        if let Some(request_id) = ctx.request_id {
            push_checked(&mut entries, service, REQUEST_ID_HEADER, request_id)?;
        }

        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn apply(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (name, value) in self.iter() {
            request = request.header(name, value);
        }
        request
    }
}

#[track_caller]
fn push_checked(
    entries: &mut Vec<(&'static str, String)>,
    service: &str,
    header: &'static str,
    value: &str,
) -> Result<()> {
    if HeaderValue::from_str(value).is_err() {
        return Err(RpcError::InvalidMetadata {
            service: service.to_string(),
            header,
            location: ErrorLocation::from(Location::caller()),
        });
    }
    entries.push((header, value.to_string()));
    Ok(())
}
