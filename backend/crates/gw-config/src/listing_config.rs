use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT_CEILING: u32 = 500;
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_MAX_LIMIT: u32 = 50;

/// Page size rules for cursor listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Page size when the client sends none or garbage
    pub default_limit: u32,
    /// Largest page size a client may request
    pub max_limit: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl ListingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_limit < MIN_LIMIT || self.max_limit > MAX_LIMIT_CEILING {
            return Err(ConfigError::config(format!(
                "listing.max_limit must be {}-{}, got {}",
                MIN_LIMIT, MAX_LIMIT_CEILING, self.max_limit
            )));
        }

        if self.default_limit < MIN_LIMIT || self.default_limit > self.max_limit {
            return Err(ConfigError::config(format!(
                "listing.default_limit must be {}-{} (max_limit), got {}",
                MIN_LIMIT, self.max_limit, self.default_limit
            )));
        }

        Ok(())
    }
}
