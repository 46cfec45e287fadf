use crate::{Cursor, PageLimits, Result, SortOrder};

use gw_cache::CacheKey;
use gw_core::TenantId;
use serde::Deserialize;

const CACHE_NAMESPACE: &str = "listing";

/// Raw listing query string as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub limit: Option<String>,
    pub cursor: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub filter: Option<String>,
}

/// Fully-qualified listing request: every input that can change the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub tenant: TenantId,
    pub cursor: Option<String>,
    pub limit: u32,
    pub sort: SortOrder,
    pub search: Option<String>,
    pub filter: Option<String>,
}

impl ListingQuery {
    pub fn new(tenant: TenantId, params: ListingParams, limits: &PageLimits) -> Self {
        Self {
            tenant,
            limit: limits.resolve(params.limit.as_deref()),
            sort: SortOrder::parse(params.sort.as_deref()),
            cursor: non_empty(params.cursor),
            search: non_empty(params.search),
            filter: non_empty(params.filter),
        }
    }

    pub fn decoded_cursor(&self) -> Result<Option<Cursor>> {
        self.cursor.as_deref().map(Cursor::decode).transpose()
    }

    /// Key covering every field of the query; two queries share a cached
    /// page only if they are equal.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(CACHE_NAMESPACE)
            .part(self.tenant.as_str())
            .part(self.cursor.as_deref().unwrap_or_default())
            .part(self.limit.to_string())
            .part(self.sort.as_str())
            .part(self.search.as_deref().unwrap_or_default())
            .part(self.filter.as_deref().unwrap_or_default())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
