use gw_core::{Identity, TenantId};

/// Which request-scoped fields a backend expects on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceScope {
    /// Nothing beyond the correlation id
    Anonymous,
    /// Caller identity
    User,
    /// Caller identity and the resolved tenant
    UserAndTenant,
}

impl ServiceScope {
    pub fn requires_identity(&self) -> bool {
        matches!(self, Self::User | Self::UserAndTenant)
    }

    pub fn requires_tenant(&self) -> bool {
        matches!(self, Self::UserAndTenant)
    }
}

/// Request-scoped values available to an outbound call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext<'a> {
    pub identity: Option<&'a Identity>,
    pub tenant: Option<&'a TenantId>,
    pub request_id: Option<&'a str>,
}

impl<'a> CallContext<'a> {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(identity: &'a Identity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    pub fn tenant(identity: &'a Identity, tenant: &'a TenantId) -> Self {
        Self {
            identity: Some(identity),
            tenant: Some(tenant),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: &'a str) -> Self {
        self.request_id = Some(request_id);
        self
    }
}
