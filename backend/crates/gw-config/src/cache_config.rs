use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// TTL constraints (seconds)
pub const MIN_TTL_SECS: u64 = 1;
pub const MAX_TTL_SECS: u64 = 86_400;
pub const DEFAULT_IDENTITY_TTL_SECS: u64 = 600;
pub const DEFAULT_TENANT_TTL_SECS: u64 = 600;
pub const DEFAULT_LISTING_TTL_SECS: u64 = 30;

pub const MIN_MAX_ENTRIES: usize = 100;
pub const MAX_MAX_ENTRIES: usize = 10_000_000;
pub const DEFAULT_MAX_ENTRIES: usize = 100_000;

pub const MIN_SWEEP_INTERVAL_SECS: u64 = 1;
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Cache lifetimes for the three gateway caches and the in-memory store bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of a validated credential
    pub identity_ttl_secs: u64,
    /// Lifetime of a confirmed (subject, tenant) grant
    pub tenant_ttl_secs: u64,
    /// Lifetime of a cached listing page
    pub listing_ttl_secs: u64,
    /// Upper bound on live entries in the in-memory store
    pub max_entries: usize,
    /// How often expired entries are swept
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            identity_ttl_secs: DEFAULT_IDENTITY_TTL_SECS,
            tenant_ttl_secs: DEFAULT_TENANT_TTL_SECS,
            listing_ttl_secs: DEFAULT_LISTING_TTL_SECS,
            max_entries: DEFAULT_MAX_ENTRIES,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, value) in [
            ("identity_ttl_secs", self.identity_ttl_secs),
            ("tenant_ttl_secs", self.tenant_ttl_secs),
            ("listing_ttl_secs", self.listing_ttl_secs),
        ] {
            if !(MIN_TTL_SECS..=MAX_TTL_SECS).contains(&value) {
                return Err(ConfigError::cache(format!(
                    "cache.{} must be {}-{}, got {}",
                    name, MIN_TTL_SECS, MAX_TTL_SECS, value
                )));
            }
        }

        if self.max_entries < MIN_MAX_ENTRIES || self.max_entries > MAX_MAX_ENTRIES {
            return Err(ConfigError::cache(format!(
                "cache.max_entries must be {}-{}, got {}",
                MIN_MAX_ENTRIES, MAX_MAX_ENTRIES, self.max_entries
            )));
        }

        if self.sweep_interval_secs < MIN_SWEEP_INTERVAL_SECS
            || self.sweep_interval_secs > MAX_SWEEP_INTERVAL_SECS
        {
            return Err(ConfigError::cache(format!(
                "cache.sweep_interval_secs must be {}-{}, got {}",
                MIN_SWEEP_INTERVAL_SECS, MAX_SWEEP_INTERVAL_SECS, self.sweep_interval_secs
            )));
        }

        Ok(())
    }

    pub fn identity_ttl(&self) -> Duration {
        Duration::from_secs(self.identity_ttl_secs)
    }

    pub fn tenant_ttl(&self) -> Duration {
        Duration::from_secs(self.tenant_ttl_secs)
    }

    pub fn listing_ttl(&self) -> Duration {
        Duration::from_secs(self.listing_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
