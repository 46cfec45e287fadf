use crate::{CacheError, CacheKey, CacheStore, Result};

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Typed JSON access on top of any [`CacheStore`].
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    async fn get_json<T>(&self, key: &CacheKey) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let rendered = key.render();
        match self.get(&rendered).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| CacheError::Serialization {
                    key: rendered,
                    source,
                    location: ErrorLocation::from(Location::caller()),
                }),
            None => Ok(None),
        }
    }

    async fn set_json<T>(&self, key: &CacheKey, value: &T, ttl: Duration) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let rendered = key.render();
        let raw = serde_json::to_string(value).map_err(|source| CacheError::Serialization {
            key: rendered.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;
        self.set(&rendered, raw, ttl).await
    }
}

impl<S: CacheStore + ?Sized> CacheStoreExt for S {}
