use async_trait::async_trait;
use gw_rpc::{CallContext, Result as RpcResult};
use serde::{Deserialize, Serialize};

/// Identity Authority's answer for a valid credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValidation {
    pub user_id: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Credential expiry as unix seconds, when the authority knows it
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Validates opaque bearer credentials.
#[async_trait]
pub trait IdentityAuthority: Send + Sync {
    async fn validate(&self, token: &str, ctx: &CallContext<'_>) -> RpcResult<TokenValidation>;
}
