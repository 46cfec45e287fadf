use async_trait::async_trait;
use gw_rpc::{CallContext, Result as RpcResult};
use serde::{Deserialize, Serialize};

/// Tenant the caller owns, as reported by the Tenant Authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantGrant {
    pub id: String,
}

/// Answers "which tenant does this caller own".
///
/// The context always carries the caller identity.
#[async_trait]
pub trait TenantAuthority: Send + Sync {
    async fn owned_tenant(&self, ctx: &CallContext<'_>) -> RpcResult<TenantGrant>;
}
