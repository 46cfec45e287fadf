use crate::{ListingPage, ListingQuery, ResourceAuthority};

use async_trait::async_trait;
use gw_rpc::{CallContext, Result as RpcResult, ServiceClient, ServiceRequest};

const LIST_PATH: &str = "/v1/products";

/// Resource Authority reached over HTTP/JSON. The client must be built with
/// `ServiceScope::UserAndTenant`.
pub struct HttpResourceAuthority {
    client: ServiceClient,
}

impl HttpResourceAuthority {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceAuthority for HttpResourceAuthority {
    async fn list(&self, query: &ListingQuery, ctx: &CallContext<'_>) -> RpcResult<ListingPage> {
        let request = ServiceRequest::get(LIST_PATH)
            .query("limit", query.limit.to_string())
            .query("sort", query.sort.as_str())
            .query_opt("cursor", query.cursor.as_deref())
            .query_opt("search", query.search.as_deref())
            .query_opt("filter", query.filter.as_deref());
        self.client.call(request, ctx).await
    }
}
