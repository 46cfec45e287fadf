use crate::{ListingPage, ListingQuery};

use async_trait::async_trait;
use gw_rpc::{CallContext, Result as RpcResult};

/// Serves pages of a tenant's resources.
///
/// Implementations fetch `limit + 1` rows ordered by the query's sort with
/// `id` as tie-break, so consecutive pages neither skip nor repeat rows.
#[async_trait]
pub trait ResourceAuthority: Send + Sync {
    async fn list(&self, query: &ListingQuery, ctx: &CallContext<'_>) -> RpcResult<ListingPage>;
}
