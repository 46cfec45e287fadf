pub mod cache_key;
pub mod cache_store;
pub mod cache_store_ext;
pub mod error;
pub mod memory_cache_store;

pub use cache_key::CacheKey;
pub use cache_store::CacheStore;
pub use cache_store_ext::CacheStoreExt;
pub use error::{CacheError, Result};
pub use memory_cache_store::{CacheStats, MemoryCacheStore};
