use crate::{ApiError, ApiResult, RequestContext};

use gw_core::{Identity, TenantId};
use gw_rpc::CallContext;

/// What the pipeline has established about a request so far.
///
/// Each stage reads what earlier stages produced and adds its own result;
/// nothing is smuggled through untyped request extensions.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub context: RequestContext,
    pub identity: Option<Identity>,
    pub tenant: Option<TenantId>,
}

impl RequestState {
    pub fn new(context: RequestContext) -> Self {
        Self {
            context,
            identity: None,
            tenant: None,
        }
    }

    #[track_caller]
    pub fn identity(&self) -> ApiResult<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| ApiError::internal("identity required before it was resolved"))
    }

    #[track_caller]
    pub fn into_authorized(self) -> ApiResult<AuthorizedRequest> {
        let identity = self
            .identity
            .ok_or_else(|| ApiError::internal("pipeline finished without an identity"))?;
        Ok(AuthorizedRequest {
            context: self.context,
            identity,
            tenant: self.tenant,
        })
    }
}

/// A request that passed every stage of its route's policy.
#[derive(Debug, Clone)]
pub struct AuthorizedRequest {
    pub context: RequestContext,
    pub identity: Identity,
    /// Present exactly when the route is tenant-scoped
    pub tenant: Option<TenantId>,
}

impl AuthorizedRequest {
    #[track_caller]
    pub fn tenant(&self) -> ApiResult<&TenantId> {
        self.tenant
            .as_ref()
            .ok_or_else(|| ApiError::internal("tenant required on a route without tenant scope"))
    }

    /// Outbound context carrying everything the pipeline resolved.
    pub fn call_context(&self) -> CallContext<'_> {
        let ctx = match &self.tenant {
            Some(tenant) => CallContext::tenant(&self.identity, tenant),
            None => CallContext::user(&self.identity),
        };
        ctx.with_request_id(&self.context.correlation_id)
    }
}
