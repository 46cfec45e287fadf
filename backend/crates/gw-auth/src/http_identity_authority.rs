use crate::{IdentityAuthority, TokenValidation};

use async_trait::async_trait;
use gw_rpc::{CallContext, Result as RpcResult, ServiceClient, ServiceRequest};
use serde_json::json;

const VALIDATE_PATH: &str = "/v1/tokens/validate";

/// Identity Authority reached over HTTP/JSON.
pub struct HttpIdentityAuthority {
    client: ServiceClient,
}

impl HttpIdentityAuthority {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityAuthority for HttpIdentityAuthority {
    async fn validate(&self, token: &str, ctx: &CallContext<'_>) -> RpcResult<TokenValidation> {
        let request = ServiceRequest::post(VALIDATE_PATH).json(json!({ "token": token }));
        self.client.call(request, ctx).await
    }
}
