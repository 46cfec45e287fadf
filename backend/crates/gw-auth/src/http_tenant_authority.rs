use crate::{TenantAuthority, TenantGrant};

use async_trait::async_trait;
use gw_rpc::{CallContext, Result as RpcResult, ServiceClient, ServiceRequest};

const OWNED_TENANT_PATH: &str = "/v1/shops/me";

/// Tenant Authority reached over HTTP/JSON. The client must be built with
/// `ServiceScope::User` so the caller identity travels with the lookup.
pub struct HttpTenantAuthority {
    client: ServiceClient,
}

impl HttpTenantAuthority {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TenantAuthority for HttpTenantAuthority {
    async fn owned_tenant(&self, ctx: &CallContext<'_>) -> RpcResult<TenantGrant> {
        self.client
            .call(ServiceRequest::get(OWNED_TENANT_PATH), ctx)
            .await
    }
}
