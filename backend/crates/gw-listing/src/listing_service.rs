use crate::{ListingError, ListingPage, ListingQuery, ResourceAuthority, Result};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use gw_cache::{CacheStore, CacheStoreExt};
use gw_rpc::CallContext;
use log::{debug, warn};
use metrics::counter;

const CACHE_LABEL: &str = "listing";

/// Cursor-paginated listings with a short-lived response cache.
///
/// The cache is a read optimisation only: identical queries within the TTL
/// are answered without calling the Resource Authority, and any cache
/// failure degrades to a plain authority call.
pub struct ListingService {
    cache: Arc<dyn CacheStore>,
    authority: Arc<dyn ResourceAuthority>,
    ttl: Duration,
}

impl ListingService {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        authority: Arc<dyn ResourceAuthority>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            authority,
            ttl,
        }
    }

    pub async fn list(&self, query: &ListingQuery, ctx: &CallContext<'_>) -> Result<ListingPage> {
        // Malformed cursors never reach the cache or the authority
        query.decoded_cursor()?;

        let key = query.cache_key();
        let cached: gw_cache::Result<Option<ListingPage>> = self.cache.get_json(&key).await;
        match cached {
            Ok(Some(page)) => {
                counter!("gw.cache.hit", "cache" => CACHE_LABEL).increment(1);
                debug!("Listing cache hit for tenant {}", query.tenant);
                return Ok(page);
            }
            Ok(None) => {}
            Err(e) => warn!("Listing cache read failed, treating as miss: {}", e),
        }
        counter!("gw.cache.miss", "cache" => CACHE_LABEL).increment(1);

        let page = self
            .authority
            .list(query, ctx)
            .await
            .map_err(|source| ListingError::Authority {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Err(e) = self.cache.set_json(&key, &page, self.ttl).await {
            warn!("Listing cache write failed: {}", e);
        }

        Ok(page)
    }
}
