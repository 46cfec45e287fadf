use crate::Result;

use std::time::Duration;

use async_trait::async_trait;

/// Key-value store with per-entry expiry.
///
/// Implementations must be safe for concurrent use. Callers treat every
/// error as a cache miss, so a failing store degrades to "always ask the
/// authority" rather than failing requests.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key` for `ttl`. A zero `ttl` stores nothing.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
